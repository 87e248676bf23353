//! Errors for malformed datagrams. Receivers drop these silently.

use common::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("Truncated Error: {message} {location}")]
    Truncated {
        message: String,
        location: ErrorLocation,
    },

    #[error("Header Error: {message} {location}")]
    Header {
        message: String,
        location: ErrorLocation,
    },

    #[error("Oversize Error: {message} {location}")]
    Oversize {
        message: String,
        location: ErrorLocation,
    },
}

impl WireError {
    #[track_caller]
    pub fn truncated(message: impl Into<String>) -> Self {
        WireError::Truncated {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn header(message: impl Into<String>) -> Self {
        WireError::Header {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn oversize(message: impl Into<String>) -> Self {
        WireError::Oversize {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
