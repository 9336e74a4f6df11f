//! Folder-Backed Media Library
//!
//! Desktop stand-in for the device media-enumeration capability: scans a
//! music directory and reports each audio file as a raw asset record. A
//! sidecar image (`{stem}.jpg`, else `cover.jpg` in the same directory) is
//! reported as the asset's transient artwork reference.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    media::{AssetQuery, MediaLibrary, MediaType, PermissionStatus, RawAssetRecord},
};
use lofty::file::AudioFile;
use lofty::probe::Probe;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions scanned as audio. `.wma` is included deliberately: format
/// policy belongs to the core, not the enumerator.
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "m4a", "aac", "wav", "opus", "wma"];

/// Directory-scanning media library
pub struct FolderMediaLibrary {
    root: PathBuf,
}

impl FolderMediaLibrary {
    /// Create a library over the given music directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_audio_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                AUDIO_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
    }

    /// Probe the file for its duration; unreadable files report zero.
    fn probe_duration_secs(path: &Path) -> f64 {
        match Probe::open(path).and_then(|probe| probe.read()) {
            Ok(tagged_file) => tagged_file.properties().duration().as_secs_f64(),
            Err(e) => {
                warn!(path = ?path, error = %e, "Failed to probe duration");
                0.0
            }
        }
    }

    /// Locate a sidecar artwork image for the audio file.
    fn sidecar_artwork(path: &Path) -> Option<String> {
        let stem_image = path.with_extension("jpg");
        if stem_image.exists() {
            return Some(stem_image.to_string_lossy().into_owned());
        }

        let cover = path.parent()?.join("cover.jpg");
        if cover.exists() {
            return Some(cover.to_string_lossy().into_owned());
        }

        None
    }
}

#[async_trait]
impl MediaLibrary for FolderMediaLibrary {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        // Desktop has no permission dialog; an unreadable root is the closest
        // equivalent of a denial.
        let status = if tokio::fs::try_exists(&self.root)
            .await
            .map_err(BridgeError::Io)?
        {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };

        debug!(root = ?self.root, ?status, "Media library permission request");
        Ok(status)
    }

    async fn list_assets(&self, query: AssetQuery) -> Result<Vec<RawAssetRecord>> {
        if query.media_type != MediaType::Audio {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(BridgeError::Io)?;

        while let Some(entry) = read_dir.next_entry().await.map_err(BridgeError::Io)? {
            let path = entry.path();
            if path.is_file() && Self::is_audio_file(&path) {
                files.push(path);
            }
        }

        // Directory order is filesystem-dependent; sort for a stable listing.
        files.sort();
        files.truncate(query.limit);

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            records.push(RawAssetRecord {
                id: path.to_string_lossy().into_owned(),
                filename,
                uri: format!("file://{}", path.to_string_lossy()),
                duration_secs: Self::probe_duration_secs(&path),
                artist: None,
                artwork_ref: Self::sidecar_artwork(&path),
            });
        }

        debug!(root = ?self.root, count = records.len(), "Listed audio assets");
        Ok(records)
    }
}
