//! Protocol compiler for the LIFX LAN protocol.
//!
//! [`decode`] turns a YAML protocol document into a [`ProtocolSpec`];
//! [`generate`] writes typed encode/decode code for it. Build scripts call
//! both and `include!` the result.

pub mod decode;
pub mod error;
pub mod generate;

#[cfg(test)]
mod tests;

pub use decode::{ProtocolSpec, decode};
pub use error::{FormatError, GenError, GenerationError};
pub use generate::generate;

use std::fs;
use std::path::Path;

/// Reads, decodes and generates in one step.
pub fn compile(document_path: &Path, output_root: &Path) -> Result<ProtocolSpec, GenError> {
    let document = fs::read(document_path).map_err(|e| FormatError::read(document_path, e))?;
    let spec = decode(&document)?;
    generate(&spec, output_root)?;
    Ok(spec)
}
