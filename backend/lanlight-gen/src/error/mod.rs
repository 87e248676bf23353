pub mod format;
pub mod generation;

pub use format::FormatError;
pub use generation::GenerationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Format(#[from] format::FormatError),

    #[error(transparent)]
    Generation(#[from] generation::GenerationError),
}
