//! Asset Source Adapter
//!
//! Wraps the device media-enumeration capability: runs the permission flow,
//! enumerates raw records, applies the unsupported-format policy, and maps
//! records into [`AudioAsset`]s. Ordering is whatever the device returned.

use crate::error::{LibraryError, Result};
use crate::models::AudioAsset;
use bridge_traits::media::{AssetQuery, MediaLibrary};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Extensions excluded before any further processing: the player engine
/// cannot decode them.
const UNSUPPORTED_EXTENSIONS: &[&str] = &["wma"];

/// Adapter over the device media library.
#[derive(Clone)]
pub struct AssetSourceAdapter {
    media_library: Arc<dyn MediaLibrary>,
}

impl AssetSourceAdapter {
    /// Create an adapter over the given media library bridge.
    pub fn new(media_library: Arc<dyn MediaLibrary>) -> Self {
        Self { media_library }
    }

    /// Request permission and enumerate up to `limit` audio assets.
    ///
    /// # Errors
    ///
    /// - [`LibraryError::PermissionDenied`] when the user declines; no
    ///   enumeration call is made and the session list stays empty.
    /// - [`LibraryError::Enumeration`] when the device listing fails.
    pub async fn fetch_assets(&self, limit: usize) -> Result<Vec<AudioAsset>> {
        let status = self.media_library.request_permission().await?;
        if !status.is_granted() {
            warn!("Media library permission denied");
            return Err(LibraryError::PermissionDenied);
        }

        let records = self
            .media_library
            .list_assets(AssetQuery::audio(limit))
            .await
            .map_err(|e| LibraryError::Enumeration(e.to_string()))?;

        let raw_count = records.len();
        let assets: Vec<AudioAsset> = records
            .into_iter()
            .filter(|record| {
                let supported = is_supported(&record.filename);
                if !supported {
                    debug!(filename = %record.filename, "Skipping unsupported format");
                }
                supported
            })
            .map(AudioAsset::from)
            .collect();

        info!(
            raw = raw_count,
            kept = assets.len(),
            "Enumerated device audio assets"
        );
        Ok(assets)
    }
}

/// Format policy check, ASCII case-insensitive on the extension.
fn is_supported(filename: &str) -> bool {
    let extension = filename.rsplit('.').next().unwrap_or("");
    !UNSUPPORTED_EXTENSIONS
        .iter()
        .any(|blocked| extension.eq_ignore_ascii_case(blocked))
}
