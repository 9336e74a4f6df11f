//! Desktop bridge implementations.
//!
//! Concrete adapters for running the player core on a desktop host:
//!
//! - [`TokioFileSystem`] - file I/O over `tokio::fs`
//! - [`KeyringSecureStore`] - key-value persistence in the OS keychain
//! - [`LoftyTagReader`] - embedded tag extraction via `lofty`
//! - [`FolderMediaLibrary`] - a directory scan standing in for the device
//!   media library
//!
//! Mobile hosts ship their own adapter crates against the same
//! `bridge-traits` surface.

pub mod filesystem;
pub mod media;
#[cfg(feature = "secure-store")]
pub mod secure_store;
pub mod tags;

pub use filesystem::TokioFileSystem;
pub use media::FolderMediaLibrary;
#[cfg(feature = "secure-store")]
pub use secure_store::KeyringSecureStore;
pub use tags::LoftyTagReader;
