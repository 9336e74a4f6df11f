//! Metadata Enricher
//!
//! Augments a raw asset with tag-derived metadata through the `TagReader`
//! bridge. Extraction failure is never fatal: the asset comes back with the
//! literal defaults substituted and the batch continues without it noticing.

use crate::error::{MetadataError, Result};
use bridge_traits::tags::{TagReader, TagRecord};
use core_library::models::{AudioAsset, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tag-based asset enrichment.
#[derive(Clone)]
pub struct MetadataEnricher {
    tag_reader: Arc<dyn TagReader>,
}

impl MetadataEnricher {
    /// Create an enricher over the given tag reader bridge.
    pub fn new(tag_reader: Arc<dyn TagReader>) -> Self {
        Self { tag_reader }
    }

    /// Enrich one asset in place.
    ///
    /// On successful extraction, retrieved title/artist/album values overwrite
    /// the asset's fields when present; fields the tags don't cover keep their
    /// existing values. Whatever happens, including extraction failure, the
    /// returned asset always carries an artist and an album, substituting
    /// `"Unknown Artist"` / `"Unknown Album"` where nothing better is known.
    pub async fn enrich(&self, mut asset: AudioAsset) -> AudioAsset {
        match self.read_tags(&asset).await {
            Ok(tags) => {
                debug!(asset_id = %asset.id, "Applying extracted tags");
                apply_tags(&mut asset, tags);
            }
            Err(e) => {
                // Per-asset, swallowed; the batch must not abort.
                warn!(asset_id = %asset.id, error = %e, "Tag extraction failed, using defaults");
            }
        }

        substitute_defaults(&mut asset);
        asset
    }

    async fn read_tags(&self, asset: &AudioAsset) -> Result<TagRecord> {
        self.tag_reader
            .read_tags(&asset.uri)
            .await
            .map_err(|e| MetadataError::ExtractionFailed(e.to_string()))
    }
}

/// Overwrite asset fields with any tag values present.
fn apply_tags(asset: &mut AudioAsset, tags: TagRecord) {
    if tags.name.is_some() {
        asset.title = tags.name;
    }
    // Prefer the track artist, falling back to the album artist.
    if let Some(artist) = tags.artist.or(tags.album_artist) {
        asset.artist = Some(artist);
    }
    if tags.album.is_some() {
        asset.album = tags.album;
    }
}

/// Fill artist/album with the literal defaults when still unset.
fn substitute_defaults(asset: &mut AudioAsset) {
    if asset.artist.is_none() {
        asset.artist = Some(UNKNOWN_ARTIST.to_string());
    }
    if asset.album.is_none() {
        asset.album = Some(UNKNOWN_ALBUM.to_string());
    }
}
