use common::ErrorLocation;
use models::Serial;
use std::panic::Location;
use thiserror::Error;

use super::client::ClientError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session Send Error: {serial}: {source} {location}")]
    Send {
        serial: Serial,
        location: ErrorLocation,
        #[source]
        source: ClientError,
    },

    #[error("Session Closed Error: {serial} {location}")]
    Closed {
        serial: Serial,
        location: ErrorLocation,
    },

    #[error("Device Not Found Error: {target} {location}")]
    NotFound {
        target: String,
        location: ErrorLocation,
    },

    #[error("Manager Closed Error: {message} {location}")]
    ManagerClosed {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn send(serial: Serial, source: ClientError) -> Self {
        SessionError::Send {
            serial,
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn closed(serial: Serial) -> Self {
        SessionError::Closed {
            serial,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found(target: impl Into<String>) -> Self {
        SessionError::NotFound {
            target: target.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn manager_closed(message: impl Into<String>) -> Self {
        SessionError::ManagerClosed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
