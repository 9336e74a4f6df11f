//! Track List Controller
//!
//! Orchestrates the fetch → batch-enrich → display pipeline and owns every
//! piece of session state the presentation layer reads: the asset collection,
//! the search query, the load state, and (via the artwork manager) the
//! loaded-artwork set. State is exposed only through defined operations, so
//! the whole pipeline runs and tests without a rendering host.
//!
//! ## Session state machine
//!
//! ```text
//! Idle ──load_library()──> AwaitingPermission ──grant──> Loading ──batches──> Ready
//!                                 │
//!                               denial
//!                                 ▼
//!                               Idle   (terminal for the session)
//! ```
//!
//! Enumeration failure clears the loading state and keeps the last-known
//! list. Artwork caching runs concurrently on a spawned worker and never
//! blocks the `Ready` transition. `shutdown()` cancels the batch scheduler;
//! in-flight items settle and their results are discarded.

use crate::error::{CoreError, Result};
use bridge_traits::playback::PlayerSetupOptions;
use core_library::error::LibraryError;
use core_library::models::AudioAsset;
use core_library::query::filter_assets;
use core_library::source::AssetSourceAdapter;
use core_metadata::artwork::ArtworkCacheManager;
use core_metadata::enricher::MetadataEnricher;
use core_playback::transport::TransportController;
use core_runtime::batch::{for_each_batch, BatchConfig, BatchOutcome};
use core_runtime::config::CoreConfig;
use core_runtime::events::{ArtworkEvent, CoreEvent, EventBus, LibraryEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Session load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded; also terminal after a permission denial.
    Idle,
    /// Permission request in flight.
    AwaitingPermission,
    /// Enumeration done, batches still arriving.
    Loading,
    /// At least one batch is visible (partial or full).
    Ready,
}

/// Orchestrator for the track list session.
#[derive(Clone)]
pub struct TrackListController {
    source: AssetSourceAdapter,
    enricher: MetadataEnricher,
    artwork: Arc<ArtworkCacheManager>,
    transport: TransportController,
    events: EventBus,
    batch: BatchConfig,
    asset_limit: usize,
    assets: Arc<RwLock<Vec<AudioAsset>>>,
    search_query: Arc<RwLock<String>>,
    load_state: Arc<RwLock<LoadState>>,
    cancel: CancellationToken,
}

impl TrackListController {
    /// Build a controller from a validated configuration.
    pub fn new(config: CoreConfig) -> Self {
        let events = EventBus::default();

        Self {
            source: AssetSourceAdapter::new(config.media_library),
            enricher: MetadataEnricher::new(config.tag_reader),
            artwork: Arc::new(ArtworkCacheManager::new(
                config.file_system,
                config.secure_store,
                config.cache_dir,
            )),
            transport: TransportController::new(config.player_engine, events.clone()),
            events,
            batch: config.batch,
            asset_limit: config.asset_limit,
            assets: Arc::new(RwLock::new(Vec::new())),
            search_query: Arc::new(RwLock::new(String::new())),
            load_state: Arc::new(RwLock::new(LoadState::Idle)),
            cancel: CancellationToken::new(),
        }
    }

    /// Event bus carrying progressive load, artwork, and transport events.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Transport surface for the floating player controls.
    pub fn transport(&self) -> &TransportController {
        &self.transport
    }

    /// One-time mount work: player setup and loaded-artwork restoration.
    pub async fn initialize(&self) {
        self.transport.setup(PlayerSetupOptions::default()).await;
        let restored = self.artwork.restore().await;
        debug!(restored, "Controller initialized");
    }

    /// Current load state.
    pub async fn load_state(&self) -> LoadState {
        *self.load_state.read().await
    }

    /// Full collection snapshot, unfiltered.
    pub async fn all_assets(&self) -> Vec<AudioAsset> {
        self.assets.read().await.clone()
    }

    /// Collection filtered by the current search query.
    ///
    /// Always derived fresh from the full collection, never from a previous
    /// filtered view.
    pub async fn visible_assets(&self) -> Vec<AudioAsset> {
        let query = self.search_query.read().await.clone();
        let assets = self.assets.read().await;
        filter_assets(&assets, &query).into_iter().cloned().collect()
    }

    /// Replace the session search query. Pure filter recomputation; no
    /// state-machine transition.
    pub async fn set_search_query(&self, query: impl Into<String>) {
        *self.search_query.write().await = query.into();
    }

    /// Current search query.
    pub async fn search_query(&self) -> String {
        self.search_query.read().await.clone()
    }

    /// Fetch, enrich, and progressively reveal the device's audio assets.
    ///
    /// Replaces the in-memory collection wholesale. Enriched batches become
    /// visible as they complete; artwork caching for each revealed batch runs
    /// concurrently and updates assets in place as files land in the cache.
    pub async fn load_library(&self) -> Result<()> {
        *self.load_state.write().await = LoadState::AwaitingPermission;
        self.events
            .emit(CoreEvent::Library(LibraryEvent::LoadStarted))
            .ok();

        let fetched = match self.source.fetch_assets(self.asset_limit).await {
            Ok(fetched) => fetched,
            Err(LibraryError::PermissionDenied) => {
                // Terminal for the session; no retry without an external
                // re-trigger.
                *self.load_state.write().await = LoadState::Idle;
                self.events
                    .emit(CoreEvent::Library(LibraryEvent::PermissionDenied))
                    .ok();
                return Err(CoreError::Library(LibraryError::PermissionDenied));
            }
            Err(e) => {
                let had_assets = !self.assets.read().await.is_empty();
                *self.load_state.write().await = if had_assets {
                    LoadState::Ready
                } else {
                    LoadState::Idle
                };
                warn!(error = %e, "Enumeration failed, keeping last-known list");
                self.events
                    .emit(CoreEvent::Library(LibraryEvent::LoadFailed {
                        message: e.to_string(),
                    }))
                    .ok();
                return Err(e.into());
            }
        };

        *self.load_state.write().await = LoadState::Loading;
        self.assets.write().await.clear();

        let total = fetched.len();
        let (artwork_tx, artwork_rx) = mpsc::unbounded_channel::<Vec<AudioAsset>>();
        self.spawn_artwork_worker(artwork_rx);

        let mut batch_index = 0usize;
        let outcome = for_each_batch(
            fetched,
            &self.batch,
            &self.cancel,
            |asset| {
                let enricher = self.enricher.clone();
                async move { enricher.enrich(asset).await }
            },
            |batch: Vec<AudioAsset>| {
                let index = batch_index;
                batch_index += 1;

                let assets = self.assets.clone();
                let load_state = self.load_state.clone();
                let events = self.events.clone();
                let artwork_tx = artwork_tx.clone();
                async move {
                    let loaded = {
                        let mut assets = assets.write().await;
                        assets.extend(batch.iter().cloned());
                        assets.len()
                    };
                    // Partial reveal counts as ready; artwork never blocks it.
                    *load_state.write().await = LoadState::Ready;

                    events
                        .emit(CoreEvent::Library(LibraryEvent::BatchLoaded {
                            batch_index: index,
                            loaded,
                            total,
                        }))
                        .ok();

                    artwork_tx.send(batch).ok();
                }
            },
        )
        .await;

        // Dropping the sender lets the artwork worker drain and exit.
        drop(artwork_tx);

        match outcome {
            BatchOutcome::Completed { .. } => {
                *self.load_state.write().await = LoadState::Ready;
                info!(total, "Track list ready");
                self.events
                    .emit(CoreEvent::Library(LibraryEvent::LoadCompleted { total }))
                    .ok();
            }
            BatchOutcome::Cancelled { batches } => {
                if batches == 0 {
                    *self.load_state.write().await = LoadState::Idle;
                }
                debug!(batches, "Load cancelled during teardown");
            }
        }

        Ok(())
    }

    /// Queue the asset with the given id and start playback.
    ///
    /// The queue entry is built from the asset's current fields: title falls
    /// back to the filename, artist to `"Unknown Artist"`, artwork to the
    /// cached path when present. Transport failure is logged and propagated
    /// without rollback; nothing auto-retries.
    pub async fn select_track(&self, asset_id: &str) -> Result<()> {
        let asset = {
            let assets = self.assets.read().await;
            assets.iter().find(|a| a.id == asset_id).cloned()
        }
        .ok_or_else(|| CoreError::UnknownAsset(asset_id.to_string()))?;

        self.transport.play_asset(&asset).await?;
        Ok(())
    }

    /// Cancel batch processing for teardown. In-flight items settle; their
    /// results are discarded.
    pub fn shutdown(&self) {
        debug!("Controller shutting down");
        self.cancel.cancel();
    }

    /// Process revealed batches through the artwork cache, mirroring the
    /// enrichment batching policy, with targeted single-asset updates.
    fn spawn_artwork_worker(&self, mut rx: mpsc::UnboundedReceiver<Vec<AudioAsset>>) {
        let artwork = self.artwork.clone();
        let assets = self.assets.clone();
        let events = self.events.clone();
        let cancel = self.cancel.clone();
        let batch = self.batch;

        tokio::spawn(async move {
            while let Some(group) = rx.recv().await {
                if cancel.is_cancelled() {
                    break;
                }

                let outcome = for_each_batch(
                    group,
                    &batch,
                    &cancel,
                    |asset: AudioAsset| {
                        let artwork = artwork.clone();
                        let assets = assets.clone();
                        let events = events.clone();
                        async move {
                            let Some(path) = artwork.load_artwork_for_asset(&asset).await else {
                                return;
                            };

                            {
                                let mut assets = assets.write().await;
                                if let Some(entry) = assets.iter_mut().find(|a| a.id == asset.id) {
                                    // Never cleared once resolved; only fill.
                                    if entry.artwork_uri.is_none() {
                                        entry.artwork_uri = Some(path.clone());
                                    }
                                }
                            }

                            events
                                .emit(CoreEvent::Artwork(ArtworkEvent::Cached {
                                    asset_id: asset.id,
                                    path: path.display().to_string(),
                                }))
                                .ok();
                        }
                    },
                    |_results| async {},
                )
                .await;

                if matches!(outcome, BatchOutcome::Cancelled { .. }) {
                    break;
                }

                if !batch.batch_delay.is_zero() {
                    tokio::time::sleep(batch.batch_delay).await;
                }
            }

            debug!("Artwork worker finished");
        });
    }
}
