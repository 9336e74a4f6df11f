//! Media Library Enumeration Abstractions
//!
//! Provides platform-agnostic access to the device media library: runtime
//! permission handling and enumeration of on-device audio assets.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome of a media-library permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// Access to the media library was granted.
    Granted,
    /// Access was denied; enumeration must not be attempted.
    Denied,
}

impl PermissionStatus {
    /// Returns `true` when the library may be enumerated.
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Media kind requested from the library.
///
/// Only audio is consumed by this core; the enum leaves room for hosts that
/// share one enumeration surface across media kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Audio,
    Video,
    Photo,
}

/// Query describing which assets the host should enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetQuery {
    /// Media kind to enumerate.
    pub media_type: MediaType,
    /// Maximum number of records to return.
    pub limit: usize,
}

impl AssetQuery {
    /// Query for the first `limit` audio assets.
    pub fn audio(limit: usize) -> Self {
        Self {
            media_type: MediaType::Audio,
            limit,
        }
    }
}

/// Raw asset record as reported by the device media library.
///
/// Field availability varies by platform; anything beyond the identifying
/// quadruple (id, filename, uri, duration) is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssetRecord {
    /// Stable, unique identifier for the device asset.
    pub id: String,
    /// Display filename, including extension.
    pub filename: String,
    /// Playable URI for the asset.
    pub uri: String,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Artist name, when the platform surfaces it during enumeration.
    pub artist: Option<String>,
    /// Transient reference to the asset's artwork (may expire between calls).
    pub artwork_ref: Option<String>,
}

/// Device media library access trait.
///
/// Implementations wrap the platform enumeration capability:
/// - iOS/Android: the native media-library APIs behind runtime permissions
/// - Desktop: a folder scan standing in for a device library
///
/// Ordering of returned records is whatever the device reports; the core
/// imposes none of its own.
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Request permission to read the media library.
    ///
    /// Must be called before [`list_assets`](Self::list_assets); hosts may
    /// show a system dialog. A denied response is terminal for the session.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Enumerate raw asset records matching the query.
    async fn list_assets(&self, query: AssetQuery) -> Result<Vec<RawAssetRecord>>;
}
