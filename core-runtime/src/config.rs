//! # Core Configuration Module
//!
//! Provides configuration management for the player core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a [`CoreConfig`]
//! instance holding all bridge dependencies and settings. It enforces fail-fast
//! validation so a missing capability surfaces at startup rather than at first
//! use.
//!
//! ## Required Dependencies
//!
//! - `MediaLibrary` - permission handling and asset enumeration
//! - `TagReader` - embedded tag extraction
//! - `PlayerEngine` - transport control
//! - `FileSystemAccess` - artwork cache I/O
//! - `SecureStore` - loaded-artwork persistence
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .cache_dir("/path/to/cache")
//!     .media_library(Arc::new(MyMediaLibrary))
//!     .tag_reader(Arc::new(MyTagReader))
//!     .player_engine(Arc::new(MyPlayerEngine))
//!     .file_system(Arc::new(MyFileSystem))
//!     .secure_store(Arc::new(MySecureStore))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::batch::BatchConfig;
use crate::error::{Error, Result};
use bridge_traits::{FileSystemAccess, MediaLibrary, PlayerEngine, SecureStore, TagReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default maximum number of assets requested from the media library.
pub const DEFAULT_ASSET_LIMIT: usize = 1000;

/// Core configuration for the player core.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Directory for cached files (artwork lives under `artwork/`)
    pub cache_dir: PathBuf,

    /// Device media library access (required)
    pub media_library: Arc<dyn MediaLibrary>,

    /// Tag extraction capability (required)
    pub tag_reader: Arc<dyn TagReader>,

    /// Native player engine (required)
    pub player_engine: Arc<dyn PlayerEngine>,

    /// File system access for the artwork cache (required)
    pub file_system: Arc<dyn FileSystemAccess>,

    /// Key-value persistence for the loaded-artwork set (required)
    pub secure_store: Arc<dyn SecureStore>,

    /// Maximum number of assets requested from the library
    pub asset_limit: usize,

    /// Batch throttling policy shared by enrichment and artwork caching
    pub batch: BatchConfig,
}

impl CoreConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Builder for [`CoreConfig`] with fail-fast validation.
#[derive(Default)]
pub struct CoreConfigBuilder {
    cache_dir: Option<PathBuf>,
    media_library: Option<Arc<dyn MediaLibrary>>,
    tag_reader: Option<Arc<dyn TagReader>>,
    player_engine: Option<Arc<dyn PlayerEngine>>,
    file_system: Option<Arc<dyn FileSystemAccess>>,
    secure_store: Option<Arc<dyn SecureStore>>,
    asset_limit: Option<usize>,
    batch: Option<BatchConfig>,
}

impl CoreConfigBuilder {
    /// Set the cache directory.
    pub fn cache_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide the media library bridge.
    pub fn media_library(mut self, media_library: Arc<dyn MediaLibrary>) -> Self {
        self.media_library = Some(media_library);
        self
    }

    /// Provide the tag reader bridge.
    pub fn tag_reader(mut self, tag_reader: Arc<dyn TagReader>) -> Self {
        self.tag_reader = Some(tag_reader);
        self
    }

    /// Provide the player engine bridge.
    pub fn player_engine(mut self, player_engine: Arc<dyn PlayerEngine>) -> Self {
        self.player_engine = Some(player_engine);
        self
    }

    /// Provide the file system bridge.
    pub fn file_system(mut self, file_system: Arc<dyn FileSystemAccess>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    /// Provide the secure store bridge.
    pub fn secure_store(mut self, secure_store: Arc<dyn SecureStore>) -> Self {
        self.secure_store = Some(secure_store);
        self
    }

    /// Override the asset enumeration limit.
    pub fn asset_limit(mut self, limit: usize) -> Self {
        self.asset_limit = Some(limit);
        self
    }

    /// Override the batch throttling policy.
    pub fn batch(mut self, batch: BatchConfig) -> Self {
        self.batch = Some(batch);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] naming the first absent required
    /// bridge, or [`Error::Config`] when the cache directory is unset.
    pub fn build(self) -> Result<CoreConfig> {
        let cache_dir = self
            .cache_dir
            .ok_or_else(|| Error::Config("cache_dir is required".to_string()))?;

        let media_library = self.media_library.ok_or_else(|| Error::CapabilityMissing {
            capability: "MediaLibrary".to_string(),
            message: "No media library implementation provided. \
                      Desktop: use bridge_desktop::FolderMediaLibrary. \
                      Mobile: inject the platform-native adapter."
                .to_string(),
        })?;

        let tag_reader = self.tag_reader.ok_or_else(|| Error::CapabilityMissing {
            capability: "TagReader".to_string(),
            message: "No tag reader implementation provided. \
                      Desktop: use bridge_desktop::LoftyTagReader. \
                      Mobile: inject the platform-native adapter."
                .to_string(),
        })?;

        let player_engine = self.player_engine.ok_or_else(|| Error::CapabilityMissing {
            capability: "PlayerEngine".to_string(),
            message: "No player engine implementation provided. \
                      Inject the host's native player adapter."
                .to_string(),
        })?;

        let file_system = self.file_system.ok_or_else(|| Error::CapabilityMissing {
            capability: "FileSystemAccess".to_string(),
            message: "No file system implementation provided. \
                      Desktop: use bridge_desktop::TokioFileSystem."
                .to_string(),
        })?;

        let secure_store = self.secure_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "SecureStore".to_string(),
            message: "No secure store implementation provided. \
                      Desktop: use bridge_desktop::KeyringSecureStore."
                .to_string(),
        })?;

        Ok(CoreConfig {
            cache_dir,
            media_library,
            tag_reader,
            player_engine,
            file_system,
            secure_store,
            asset_limit: self.asset_limit.unwrap_or(DEFAULT_ASSET_LIMIT),
            batch: self.batch.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cache_dir_is_rejected() {
        let result = CoreConfig::builder().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_media_library_names_the_capability() {
        let result = CoreConfig::builder().cache_dir("/tmp/cache").build();
        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "MediaLibrary");
            }
            other => panic!("Expected CapabilityMissing, got {:?}", other.err()),
        }
    }
}
