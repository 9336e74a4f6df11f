//! Tag Extraction using Lofty
//!
//! Desktop implementation of the `TagReader` bridge. Supports ID3v2, Vorbis
//! Comments, MP4 tags, and FLAC through the `lofty` crate.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    tags::{TagReader, TagRecord},
};
use lofty::config::ParseOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use std::path::Path;
use tracing::debug;

/// Lofty-based tag reader
pub struct LoftyTagReader {
    parse_options: ParseOptions,
}

impl LoftyTagReader {
    /// Create a new tag reader with default parse settings
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::new(),
        }
    }

    /// Create a tag reader with custom parse options
    pub fn with_options(parse_options: ParseOptions) -> Self {
        Self { parse_options }
    }

    /// Strip a `file://` scheme so device URIs resolve as local paths.
    fn uri_to_path(uri: &str) -> &Path {
        Path::new(uri.strip_prefix("file://").unwrap_or(uri))
    }

    /// Normalize text metadata: trim, collapse whitespace, drop control chars.
    fn normalize_text(text: &str) -> String {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .filter(|c| !c.is_control())
            .collect()
    }
}

impl Default for LoftyTagReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagReader for LoftyTagReader {
    async fn read_tags(&self, uri: &str) -> Result<TagRecord> {
        let path = Self::uri_to_path(uri);
        debug!(path = ?path, "Reading tags");

        let file_data = tokio::fs::read(path)
            .await
            .map_err(|e| BridgeError::OperationFailed(format!("Failed to read file: {}", e)))?;

        let tagged_file = Probe::new(std::io::Cursor::new(&file_data))
            .options(self.parse_options)
            .guess_file_type()
            .map_err(|e| BridgeError::OperationFailed(format!("Failed to probe file: {}", e)))?
            .read()
            .map_err(|e| BridgeError::OperationFailed(format!("Failed to parse file: {}", e)))?;

        // Primary tag first, falling back to the first available tag
        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

        let record = match tag {
            Some(tag) => TagRecord {
                album: tag.album().map(|s| Self::normalize_text(s.as_ref())),
                album_artist: tag
                    .get_string(&ItemKey::AlbumArtist)
                    .map(Self::normalize_text),
                artist: tag.artist().map(|s| Self::normalize_text(s.as_ref())),
                name: tag.title().map(|s| Self::normalize_text(s.as_ref())),
                track: tag.track(),
                year: tag.year().map(|y| y as i32),
            },
            None => TagRecord::default(),
        };

        Ok(record)
    }
}
