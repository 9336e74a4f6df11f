//! # Core Metadata Module
//!
//! Enrichment pipeline turning raw media-library entries into displayable,
//! playable assets:
//!
//! - [`enricher::MetadataEnricher`] - tag-based title/artist/album enrichment
//!   with default substitution; extraction failure is per-asset and non-fatal
//! - [`artwork::ArtworkCacheManager`] - persists transient device artwork
//!   handles into a deterministic local cache, deduplicating work via an
//!   idempotent existence-check-then-copy sequence and a persisted
//!   loaded-artwork set

pub mod artwork;
pub mod enricher;
pub mod error;

pub use artwork::ArtworkCacheManager;
pub use enricher::MetadataEnricher;
pub use error::{MetadataError, Result};
