use std::net::SocketAddr;
use std::panic::Location;

use common::ErrorLocation;
use thiserror::Error;

use super::wire::WireError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Bind Error: {message} {location}")]
    Bind {
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Send Error: {addr}: {source} {location}")]
    Send {
        addr: SocketAddr,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Receive Error: {source} {location}")]
    Receive {
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Encode Error: {source} {location}")]
    Encode {
        location: ErrorLocation,
        #[source]
        source: WireError,
    },

    #[error("Closed Error: {message} {location}")]
    Closed {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    #[track_caller]
    pub fn bind(message: impl Into<String>, source: std::io::Error) -> Self {
        ClientError::Bind {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn send(addr: SocketAddr, source: std::io::Error) -> Self {
        ClientError::Send {
            addr,
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn receive(source: std::io::Error) -> Self {
        ClientError::Receive {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn encode(source: WireError) -> Self {
        ClientError::Encode {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn closed(message: impl Into<String>) -> Self {
        ClientError::Closed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
