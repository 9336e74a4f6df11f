//! Remote-Control Dispatch
//!
//! The platform media session emits remote commands (lock screen, headset,
//! notification controls). Each command maps 1:1 onto a transport call. The
//! mapping is a pure table so it can be tested independently of any engine;
//! the dispatcher executes the mapped action and logs failures without
//! recovery.

use crate::transport::TransportController;
use bridge_traits::playback::RemoteCommand;
use tracing::{debug, warn};

/// Transport action selected for a remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Play,
    Pause,
    SkipToNext,
    SkipToPrevious,
    Stop,
}

/// The remote-command table: command kind → transport action.
pub fn transport_action(command: RemoteCommand) -> TransportAction {
    match command {
        RemoteCommand::Play => TransportAction::Play,
        RemoteCommand::Pause => TransportAction::Pause,
        RemoteCommand::Next => TransportAction::SkipToNext,
        RemoteCommand::Previous => TransportAction::SkipToPrevious,
        RemoteCommand::Stop => TransportAction::Stop,
    }
}

/// Executes remote commands against a transport controller.
#[derive(Clone)]
pub struct RemoteDispatcher {
    transport: TransportController,
}

impl RemoteDispatcher {
    /// Create a dispatcher over the given transport controller.
    pub fn new(transport: TransportController) -> Self {
        Self { transport }
    }

    /// Handle one remote command.
    ///
    /// Failures are logged; the media session offers no feedback channel, so
    /// the user simply retries.
    pub async fn dispatch(&self, command: RemoteCommand) {
        let action = transport_action(command);
        debug!(?command, ?action, "Dispatching remote command");

        let result = match action {
            TransportAction::Play => self.transport.play().await,
            TransportAction::Pause => self.transport.pause().await,
            TransportAction::SkipToNext => self.transport.skip_to_next().await,
            TransportAction::SkipToPrevious => self.transport.skip_to_previous().await,
            TransportAction::Stop => self.transport.stop().await,
        };

        if let Err(e) = result {
            warn!(?command, error = %e, "Remote command failed");
        }
    }
}
