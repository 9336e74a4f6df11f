use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error(transparent)]
    Library(#[from] core_library::error::LibraryError),

    #[error(transparent)]
    Playback(#[from] core_playback::error::PlaybackError),

    #[error(transparent)]
    Runtime(#[from] core_runtime::error::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
