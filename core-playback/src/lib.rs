//! # Core Playback Module
//!
//! Thin control layer over the host's [`PlayerEngine`](bridge_traits::PlayerEngine):
//!
//! - [`transport::TransportController`] - player setup, single-track queueing
//!   (strictly reset→add→play), and transport wrappers
//! - [`remote`] - table-driven mapping of remote-control commands onto
//!   transport actions
//!
//! Transport failures are logged and surface no recovery; the user retries
//! via the UI.

pub mod error;
pub mod remote;
pub mod transport;

pub use error::{PlaybackError, Result};
pub use remote::{transport_action, RemoteDispatcher, TransportAction};
pub use transport::TransportController;
