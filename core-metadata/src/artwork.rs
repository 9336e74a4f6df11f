//! Artwork Cache Manager
//!
//! Persists transient device artwork handles into a durable local cache so
//! the list view never depends on references that expire mid-session.
//!
//! ## Overview
//!
//! - Deterministic layout: one file per asset at `{cache_root}/artwork/{id}.jpg`
//! - At-most-once copy per id: an existence check short-circuits before any
//!   write, regardless of call frequency
//! - Loaded-artwork set: ids known to have a valid cache entry, seeded from
//!   the secure store at startup and persisted back on every successful copy;
//!   an accelerator only; the on-disk existence check stays the source of
//!   truth
//! - Every per-asset failure (expired handle, copy error) is swallowed and
//!   logged; an unmarked id is retried on its next encounter
//!
//! Two concurrent calls for the same id are a benign race: both write the
//! same bytes to the same deterministic path.
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::artwork::ArtworkCacheManager;
//!
//! let manager = ArtworkCacheManager::new(file_system, secure_store, cache_root);
//! manager.restore().await;
//!
//! if let Some(path) = manager.load_artwork_for_asset(&asset).await {
//!     // targeted single-item update of the displayed collection
//! }
//! ```

use crate::error::{MetadataError, Result};
use bridge_traits::storage::{FileSystemAccess, SecureStore};
use core_library::models::AudioAsset;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Secure-store key holding the persisted loaded-artwork id list.
pub const ARTWORK_CACHE_KEY: &str = "artwork_cache_data";

/// Subdirectory of the cache root holding artwork files.
const ARTWORK_DIR: &str = "artwork";

/// Local artwork cache with work deduplication.
pub struct ArtworkCacheManager {
    file_system: Arc<dyn FileSystemAccess>,
    secure_store: Arc<dyn SecureStore>,
    /// `{cache_root}/artwork`, created lazily.
    artwork_dir: PathBuf,
    /// Ids known to have a cached artwork file.
    loaded: Mutex<HashSet<String>>,
}

impl ArtworkCacheManager {
    /// Create a manager rooted at `cache_root`.
    pub fn new(
        file_system: Arc<dyn FileSystemAccess>,
        secure_store: Arc<dyn SecureStore>,
        cache_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            file_system,
            secure_store,
            artwork_dir: cache_root.into().join(ARTWORK_DIR),
            loaded: Mutex::new(HashSet::new()),
        }
    }

    /// Deterministic cache path for an asset's artwork.
    pub fn artwork_path(&self, asset_id: &str) -> PathBuf {
        self.artwork_dir.join(format!("{}.jpg", asset_id))
    }

    /// Seed the loaded set from the secure store.
    ///
    /// Absence or a corrupt payload is non-fatal: the set simply starts empty
    /// and cache correctness is preserved by the existence check. Returns the
    /// number of seeded ids.
    pub async fn restore(&self) -> usize {
        let payload = match self.secure_store.get_string(ARTWORK_CACHE_KEY).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No persisted loaded-artwork set");
                return 0;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read loaded-artwork set");
                return 0;
            }
        };

        match serde_json::from_str::<Vec<String>>(&payload) {
            Ok(ids) => {
                let count = ids.len();
                let mut loaded = self.loaded.lock().await;
                loaded.extend(ids);
                info!(count, "Restored loaded-artwork set");
                count
            }
            Err(e) => {
                warn!(error = %e, "Corrupt loaded-artwork payload, starting empty");
                0
            }
        }
    }

    /// Whether the id is already known to have cached artwork.
    pub async fn is_loaded(&self, asset_id: &str) -> bool {
        self.loaded.lock().await.contains(asset_id)
    }

    /// Snapshot of the loaded set, sorted for stable output.
    pub async fn loaded_ids(&self) -> Vec<String> {
        let loaded = self.loaded.lock().await;
        let mut ids: Vec<String> = loaded.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Cache the artwork behind `raw_ref` for `asset_id`.
    ///
    /// Returns the local path on a cache hit or successful copy, `None` when
    /// the asset has no artwork or the attempt failed. Failures are logged and
    /// swallowed; an unsuccessful id stays unmarked so the next encounter
    /// retries.
    pub async fn cache_artwork(&self, raw_ref: Option<&str>, asset_id: &str) -> Option<PathBuf> {
        // An asset may legitimately have no artwork.
        let raw_ref = raw_ref?;

        match self.try_cache(raw_ref, asset_id).await {
            Ok(path) => path,
            Err(e) => {
                warn!(asset_id, error = %e, "Artwork caching failed");
                None
            }
        }
    }

    async fn try_cache(&self, raw_ref: &str, asset_id: &str) -> Result<Option<PathBuf>> {
        self.file_system.create_dir_all(&self.artwork_dir).await?;

        let target = self.artwork_path(asset_id);
        if self.file_system.exists(&target).await? {
            debug!(asset_id, "Artwork cache hit");
            return Ok(Some(target));
        }

        // Transient device handles can expire between enumeration and now.
        let source = ref_to_path(raw_ref);
        if !self.file_system.exists(source).await? {
            return Err(MetadataError::ArtworkSourceInvalid(raw_ref.to_string()));
        }

        self.file_system
            .copy_file(source, &target)
            .await
            .map_err(|e| MetadataError::ArtworkCopyFailed(e.to_string()))?;

        self.mark_loaded(asset_id).await;
        info!(asset_id, path = %target.display(), "Cached artwork");
        Ok(Some(target))
    }

    /// Resolve artwork for a displayed asset.
    ///
    /// Short-circuits before touching storage when the asset has no raw
    /// reference, or when its id is already in the loaded set (the
    /// deterministic path is then returned directly, since set membership means a
    /// valid cache entry exists). Otherwise runs the full caching sequence.
    pub async fn load_artwork_for_asset(&self, asset: &AudioAsset) -> Option<PathBuf> {
        asset.artwork_ref.as_ref()?;

        if self.is_loaded(&asset.id).await {
            debug!(asset_id = %asset.id, "Artwork already loaded this session");
            return Some(self.artwork_path(&asset.id));
        }

        self.cache_artwork(asset.artwork_ref.as_deref(), &asset.id)
            .await
    }

    async fn mark_loaded(&self, asset_id: &str) {
        {
            let mut loaded = self.loaded.lock().await;
            loaded.insert(asset_id.to_string());
        }
        self.persist().await;
    }

    /// Write the loaded set back to the secure store. Failures are logged and
    /// non-fatal: the existence check keeps the cache correct either way.
    async fn persist(&self) {
        let ids = self.loaded_ids().await;
        let payload = match serde_json::to_string(&ids) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize loaded-artwork set");
                return;
            }
        };

        if let Err(e) = self
            .secure_store
            .set_string(ARTWORK_CACHE_KEY, &payload)
            .await
        {
            warn!(error = %e, "Failed to persist loaded-artwork set");
        }
    }
}

/// Strip a `file://` scheme so bridge implementations see a plain path.
fn ref_to_path(raw_ref: &str) -> &Path {
    Path::new(raw_ref.strip_prefix("file://").unwrap_or(raw_ref))
}
