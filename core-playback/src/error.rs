use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("Transport command '{command}' failed: {message}")]
    Transport { command: String, message: String },

    #[error("Bridge error: {0}")]
    Bridge(#[from] bridge_traits::error::BridgeError),
}

impl PlaybackError {
    /// Wrap a bridge failure with the transport command it interrupted.
    pub fn transport(command: &str, error: bridge_traits::error::BridgeError) -> Self {
        Self::Transport {
            command: command.to_string(),
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
