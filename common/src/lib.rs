//! Shared building blocks for the lanlight workspace.
//!
//! Every crate in the workspace reports failures through `thiserror` enums whose
//! variants carry an [`ErrorLocation`], so a log line always points back at the
//! call site that produced it.

pub mod error;

pub use error::error_location::ErrorLocation;
