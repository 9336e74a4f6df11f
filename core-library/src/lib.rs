//! # Core Library Module
//!
//! The track-list domain model and its acquisition path:
//! - [`models::AudioAsset`] - the displayable, playable asset entity
//! - [`source::AssetSourceAdapter`] - permission flow and device enumeration
//! - [`query`] - search filtering over the visible collection

pub mod error;
pub mod models;
pub mod query;
pub mod source;

pub use error::{LibraryError, Result};
pub use models::AudioAsset;
pub use source::AssetSourceAdapter;
