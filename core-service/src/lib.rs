//! Core service façade.
//!
//! This crate wires host-provided bridge implementations (media library, tag
//! reader, player engine, filesystem, secure storage) into the track-list
//! pipeline. Desktop apps typically enable the `desktop-shims` feature (which
//! depends on `bridge-desktop`); mobile hosts inject their own adapters
//! through `core_runtime::config::CoreConfig`.
//!
//! The primary entry point is [`TrackListController`]: it owns the session
//! state (asset collection, search query, load state, loaded-artwork set) and
//! exposes it only through defined operations, so the whole pipeline is
//! testable without a rendering host.

pub mod controller;
pub mod error;

pub use controller::{LoadState, TrackListController};
pub use error::{CoreError, Result};
