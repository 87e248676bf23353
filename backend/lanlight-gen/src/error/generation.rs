use std::path::PathBuf;
use std::panic::Location;

use common::ErrorLocation;
use thiserror::Error;

/// Failure producing one generated artifact. `template` names the template
/// that was being rendered so the failing artifact is identifiable.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Render Error: {template}: {message} {location}")]
    Render {
        template: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Format Error: {template}: {message} {location}")]
    Format {
        template: &'static str,
        message: String,
        location: ErrorLocation,
        #[source]
        source: syn::Error,
    },

    #[error("Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },
}

impl GenerationError {
    #[track_caller]
    pub fn render(template: &'static str, message: impl Into<String>) -> Self {
        GenerationError::Render {
            template,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn format(template: &'static str, source: syn::Error) -> Self {
        GenerationError::Format {
            template,
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerationError::Write {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    /// Template path for render and format failures.
    pub fn template(&self) -> Option<&'static str> {
        match self {
            GenerationError::Render { template, .. } | GenerationError::Format { template, .. } => {
                Some(template)
            }
            GenerationError::Write { .. } => None,
        }
    }
}
