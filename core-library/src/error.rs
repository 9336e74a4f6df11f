use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Media library permission denied")]
    PermissionDenied,

    #[error("Asset enumeration failed: {0}")]
    Enumeration(String),

    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
