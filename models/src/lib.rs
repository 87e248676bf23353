//! Device records shared by the lanlight runtime and its front ends.
//!
//! This crate only holds data. The runtime in `lanlight-core` owns the write
//! side (each device session mutates exactly one [`Device`]), while the CLI and
//! any other consumer read snapshots.

pub mod device;
pub mod error;

pub use common::ErrorLocation;
pub use device::color::Color;
pub use device::serial::Serial;
pub use device::{Device, DeviceType, LightType, sort_devices};
pub use error::model_error::ModelError;

#[cfg(test)]
mod tests;
