//! # Event Bus System
//!
//! Event-driven notifications for the player core using
//! `tokio::sync::broadcast`. The track-list pipeline publishes progressive
//! load updates here so presentation layers can react without polling, and
//! playback activity is mirrored for the transport bar.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, LibraryEvent};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = EventBus::new(100);
//! let mut subscriber = bus.subscribe();
//!
//! bus.emit(CoreEvent::Library(LibraryEvent::LoadStarted)).ok();
//!
//! let event = subscriber.recv().await.unwrap();
//! assert!(matches!(event, CoreEvent::Library(LibraryEvent::LoadStarted)));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! `RecvError::Lagged(n)` means a slow subscriber missed `n` events and can
//! keep receiving; `RecvError::Closed` signals shutdown. Emitting with no
//! subscribers returns an error the publishers ignore.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Track-list loading events
    Library(LibraryEvent),
    /// Artwork cache events
    Artwork(ArtworkEvent),
    /// Playback-related events
    Playback(PlaybackEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Library(e) => e.description(),
            CoreEvent::Artwork(e) => e.description(),
            CoreEvent::Playback(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Library(LibraryEvent::LoadFailed { .. }) => EventSeverity::Error,
            CoreEvent::Playback(PlaybackEvent::TransportFailed { .. }) => EventSeverity::Error,
            CoreEvent::Library(LibraryEvent::PermissionDenied) => EventSeverity::Warning,
            CoreEvent::Library(LibraryEvent::LoadCompleted { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Library Events
// ============================================================================

/// Events emitted while the track list loads and enriches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum LibraryEvent {
    /// Permission request issued; enumeration pending.
    LoadStarted,
    /// Media-library permission was denied; the session list stays empty.
    PermissionDenied,
    /// One enrichment batch landed in the visible collection.
    BatchLoaded {
        /// Zero-based index of the completed batch.
        batch_index: usize,
        /// Assets visible so far.
        loaded: usize,
        /// Assets expected for this load.
        total: usize,
    },
    /// Every batch landed; the list is fully enriched.
    LoadCompleted {
        /// Final size of the visible collection.
        total: usize,
    },
    /// Enumeration failed; the last-known list is kept.
    LoadFailed {
        /// Human-readable error message.
        message: String,
    },
}

impl LibraryEvent {
    fn description(&self) -> &str {
        match self {
            LibraryEvent::LoadStarted => "Track list load started",
            LibraryEvent::PermissionDenied => "Media library permission denied",
            LibraryEvent::BatchLoaded { .. } => "Track batch loaded",
            LibraryEvent::LoadCompleted { .. } => "Track list load completed",
            LibraryEvent::LoadFailed { .. } => "Track list load failed",
        }
    }
}

// ============================================================================
// Artwork Events
// ============================================================================

/// Events emitted by the artwork cache manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum ArtworkEvent {
    /// An asset's artwork landed in the local cache.
    Cached {
        /// The asset whose artwork was cached.
        asset_id: String,
        /// Local cache path.
        path: String,
    },
}

impl ArtworkEvent {
    fn description(&self) -> &str {
        match self {
            ArtworkEvent::Cached { .. } => "Artwork cached",
        }
    }
}

// ============================================================================
// Playback Events
// ============================================================================

/// Events related to transport activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// A track was queued and playback started.
    TrackQueued {
        /// The asset identifier.
        asset_id: String,
        /// Display title handed to the player.
        title: String,
    },
    /// A transport command failed; no rollback, user retries via the UI.
    TransportFailed {
        /// Command that failed (e.g. "play", "skip_to_next").
        command: String,
        /// Human-readable error message.
        message: String,
    },
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::TrackQueued { .. } => "Track queued",
            PlaybackEvent::TransportFailed { .. } => "Transport command failed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Uses `tokio::sync::broadcast` internally: multiple producers (clone the
/// bus), multiple independent consumers (each `subscribe()` call), non-blocking
/// sends, lagging detection for slow subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// when there are none (callers generally ignore it).
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber receiving all future events.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
