//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the player core and platform-specific
//! implementations. Each trait represents a capability that the core requires but
//! that must be implemented differently per platform (desktop, iOS, Android):
//!
//! - [`MediaLibrary`](media::MediaLibrary) - Permission handling and audio asset enumeration
//! - [`TagReader`](tags::TagReader) - Embedded tag extraction for a file URI
//! - [`PlayerEngine`](playback::PlayerEngine) - Transport control over the native player
//! - [`FileSystemAccess`](storage::FileSystemAccess) - File I/O for the artwork cache
//! - [`SecureStore`](storage::SecureStore) - Scoped key-value persistence
//!
//! ## Fail-Fast Strategy
//!
//! The core fails fast with descriptive errors when a required capability is
//! missing; see `core_runtime::config::CoreConfig` for the validation side.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations should convert platform-specific errors to `BridgeError` and
//! include actionable context (file paths, permission state).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds so implementations can be
//! shared freely across async tasks behind `Arc`.

pub mod error;
pub mod media;
pub mod playback;
pub mod storage;
pub mod tags;

pub use error::BridgeError;

// Re-export commonly used types
pub use media::{AssetQuery, MediaLibrary, MediaType, PermissionStatus, RawAssetRecord};
pub use playback::{
    Capability, PlayerEngine, PlayerSetupOptions, QueuedTrack, RemoteCommand, RepeatMode,
};
pub use storage::{FileSystemAccess, SecureStore};
pub use tags::{TagReader, TagRecord};
