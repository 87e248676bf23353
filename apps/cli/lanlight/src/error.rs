use common::ErrorLocation;
use lanlight_core::error::CoreError;
use lanlight_core::error::client::ClientError;
use lanlight_core::error::config::ConfigError;
use lanlight_core::error::session::SessionError;

use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// Error from this App
    #[error("Lanlight Error: {message} {location}")]
    Lanlight {
        message: String,
        location: ErrorLocation,
    },

    /// Command-line values that parse but make no sense together
    #[error("Argument Error: {message} {location}")]
    Argument {
        message: String,
        location: ErrorLocation,
    },

    /// Error from lanlight-core (config, socket, sessions)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ClientError> for AppError {
    fn from(error: ClientError) -> Self {
        AppError::Core(CoreError::from(error))
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Core(CoreError::from(error))
    }
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        AppError::Core(CoreError::from(error))
    }
}
