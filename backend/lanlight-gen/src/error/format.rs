//! Errors raised while decoding a protocol document.
//!
//! Variants about one section or entry carry its dotted key path, e.g.
//! `packets.light.LightOn`.

use common::ErrorLocation;
use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Read Error: {path}: {source} {location}")]
    Read {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Structure Error: {path}: {message} {location}")]
    Structure {
        path: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Entry Error: {path}: {message} {location}")]
    Entry {
        path: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}

impl FormatError {
    #[track_caller]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FormatError::Read {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn parse(source: serde_yaml::Error) -> Self {
        FormatError::Parse {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn structure(path: impl Into<String>, message: impl Into<String>) -> Self {
        FormatError::Structure {
            path: path.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn entry(path: impl Into<String>, message: impl Into<String>) -> Self {
        FormatError::Entry {
            path: path.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        FormatError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Key path of the offending section or entry, when there is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            FormatError::Structure { path, .. } | FormatError::Entry { path, .. } => Some(path),
            FormatError::Read { .. } | FormatError::Parse { .. } | FormatError::Validation { .. } => {
                None
            }
        }
    }
}
