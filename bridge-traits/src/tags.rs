//! Tag Extraction Abstractions
//!
//! Reading embedded metadata (ID3v2, Vorbis Comments, MP4 tags) is a host
//! capability: the codec surface differs per platform and some hosts delegate
//! to a system service. The core only sees the partial [`TagRecord`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Partial tag record extracted from an audio file.
///
/// Any subset of fields may be present; absent tags stay `None`. The field set
/// mirrors what the track list needs for display and queueing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Album name.
    pub album: Option<String>,
    /// Album artist (for compilations).
    pub album_artist: Option<String>,
    /// Primary artist.
    pub artist: Option<String>,
    /// Track title.
    pub name: Option<String>,
    /// Track number on the album.
    pub track: Option<u32>,
    /// Release year.
    pub year: Option<i32>,
}

impl TagRecord {
    /// Returns `true` when no tag field was extracted.
    pub fn is_empty(&self) -> bool {
        self.album.is_none()
            && self.album_artist.is_none()
            && self.artist.is_none()
            && self.name.is_none()
            && self.track.is_none()
            && self.year.is_none()
    }
}

/// Tag extraction trait.
///
/// # Errors
///
/// Implementations return an error for unreadable files, unsupported codecs,
/// and I/O failures. Callers treat every error as non-fatal: the asset keeps
/// default metadata and the batch continues.
#[async_trait]
pub trait TagReader: Send + Sync {
    /// Read embedded tags for the file at `uri`.
    async fn read_tags(&self, uri: &str) -> Result<TagRecord>;
}
