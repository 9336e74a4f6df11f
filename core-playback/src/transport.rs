//! Transport Controller
//!
//! Drives the host player engine for the track list: one-time setup, queueing
//! a selected asset, and the pause/resume/skip surface the floating player
//! exposes. Queueing is strictly reset→add→play so the engine never plays a
//! stale queue entry.

use crate::error::{PlaybackError, Result};
use bridge_traits::playback::{PlayerEngine, PlayerSetupOptions, QueuedTrack};
use core_library::models::AudioAsset;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Control layer over the host player engine.
#[derive(Clone)]
pub struct TransportController {
    engine: Arc<dyn PlayerEngine>,
    events: EventBus,
}

impl TransportController {
    /// Create a controller over the given engine.
    pub fn new(engine: Arc<dyn PlayerEngine>, events: EventBus) -> Self {
        Self { engine, events }
    }

    /// Apply one-time player configuration.
    ///
    /// Setup failure is logged and non-fatal: transport calls may still work
    /// and the user can retry playback from the UI.
    pub async fn setup(&self, options: PlayerSetupOptions) {
        match self.engine.setup(options).await {
            Ok(()) => debug!("Player engine configured"),
            Err(e) => warn!(error = %e, "Player setup failed"),
        }
    }

    /// Build the queue entry for an asset from its current fields.
    ///
    /// Title falls back to the filename and artist to `"Unknown Artist"`;
    /// cached artwork rides along when present.
    pub fn build_queued_track(asset: &AudioAsset) -> QueuedTrack {
        QueuedTrack {
            id: asset.id.clone(),
            url: asset.uri.clone(),
            title: asset.display_title().to_string(),
            artist: asset.display_artist().to_string(),
            artwork: asset
                .artwork_uri
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
            duration_secs: asset.duration_secs,
        }
    }

    /// Reset the queue, enqueue the asset, and start playback.
    ///
    /// # Errors
    ///
    /// Any failing transport call aborts the sequence; no rollback is
    /// attempted and nothing is retried; the user retries via the UI.
    pub async fn play_asset(&self, asset: &AudioAsset) -> Result<()> {
        let track = Self::build_queued_track(asset);
        let title = track.title.clone();

        self.engine
            .reset()
            .await
            .map_err(|e| self.transport_failure("reset", e))?;
        self.engine
            .add(track)
            .await
            .map_err(|e| self.transport_failure("add", e))?;
        self.engine
            .play()
            .await
            .map_err(|e| self.transport_failure("play", e))?;

        info!(asset_id = %asset.id, title = %title, "Queued track and started playback");
        self.events
            .emit(CoreEvent::Playback(PlaybackEvent::TrackQueued {
                asset_id: asset.id.clone(),
                title,
            }))
            .ok();

        Ok(())
    }

    /// Resume playback.
    pub async fn play(&self) -> Result<()> {
        self.engine
            .play()
            .await
            .map_err(|e| self.transport_failure("play", e))
    }

    /// Pause playback.
    pub async fn pause(&self) -> Result<()> {
        self.engine
            .pause()
            .await
            .map_err(|e| self.transport_failure("pause", e))
    }

    /// Stop playback.
    pub async fn stop(&self) -> Result<()> {
        self.engine
            .stop()
            .await
            .map_err(|e| self.transport_failure("stop", e))
    }

    /// Advance to the next queued track.
    pub async fn skip_to_next(&self) -> Result<()> {
        self.engine
            .skip_to_next()
            .await
            .map_err(|e| self.transport_failure("skip_to_next", e))
    }

    /// Return to the previous queued track.
    pub async fn skip_to_previous(&self) -> Result<()> {
        self.engine
            .skip_to_previous()
            .await
            .map_err(|e| self.transport_failure("skip_to_previous", e))
    }

    fn transport_failure(
        &self,
        command: &str,
        error: bridge_traits::error::BridgeError,
    ) -> PlaybackError {
        warn!(command, error = %error, "Transport command failed");
        self.events
            .emit(CoreEvent::Playback(PlaybackEvent::TransportFailed {
                command: command.to_string(),
                message: error.to_string(),
            }))
            .ok();
        PlaybackError::transport(command, error)
    }
}
