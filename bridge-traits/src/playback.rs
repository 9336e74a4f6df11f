//! Playback bridge traits and supporting types.
//!
//! These abstractions let the core drive a platform-native player engine
//! (queue management and transport control) while staying agnostic about the
//! engine itself. Host applications provide a concrete [`PlayerEngine`] that
//! satisfies their platform constraints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Player capability the host should expose on its media session
/// (lock screen, notification center, remote controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Play,
    Pause,
    SkipToNext,
    SkipToPrevious,
    Stop,
}

/// Queue repeat behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Play the queue once and stop.
    Off,
    /// Repeat the current track.
    Track,
    /// Restart the queue after the last track.
    Queue,
}

/// One-time player configuration applied before any transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSetupOptions {
    /// Capabilities to surface on the platform media session.
    pub capabilities: Vec<Capability>,
    /// Repeat behavior for the queue.
    pub repeat_mode: RepeatMode,
    /// Maximum player-side cache size in KiB.
    pub max_cache_size_kib: usize,
}

impl Default for PlayerSetupOptions {
    fn default() -> Self {
        Self {
            capabilities: vec![
                Capability::Play,
                Capability::Pause,
                Capability::SkipToNext,
                Capability::SkipToPrevious,
                Capability::Stop,
            ],
            repeat_mode: RepeatMode::Queue,
            max_cache_size_kib: 1024 * 10,
        }
    }
}

/// Track descriptor handed to the player queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedTrack {
    /// Asset identifier, carried through for event correlation.
    pub id: String,
    /// Playable URL or file URI.
    pub url: String,
    /// Display title.
    pub title: String,
    /// Display artist.
    pub artist: String,
    /// Local artwork path or URL, when available.
    pub artwork: Option<String>,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Remote-control command emitted by the platform media session.
///
/// The core maps each command 1:1 onto a transport call; see
/// `core_playback::remote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteCommand {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
}

/// Trait for platform-specific player engines.
///
/// Implementations own the native queue and audio session. All operations are
/// async because hosts typically marshal them onto a platform thread.
#[async_trait]
pub trait PlayerEngine: Send + Sync {
    /// Apply one-time player configuration. Called once per session before
    /// any other transport call.
    async fn setup(&self, options: PlayerSetupOptions) -> Result<()>;

    /// Clear the queue and stop any active playback.
    async fn reset(&self) -> Result<()>;

    /// Append a track to the queue.
    async fn add(&self, track: QueuedTrack) -> Result<()>;

    /// Begin or resume playback.
    async fn play(&self) -> Result<()>;

    /// Pause playback without releasing the queue.
    async fn pause(&self) -> Result<()>;

    /// Stop playback.
    async fn stop(&self) -> Result<()>;

    /// Advance to the next queued track.
    async fn skip_to_next(&self) -> Result<()>;

    /// Return to the previous queued track.
    async fn skip_to_previous(&self) -> Result<()>;
}
