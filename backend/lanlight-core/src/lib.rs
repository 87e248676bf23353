//! LIFX LAN runtime: wire codec, generated protocol types, the UDP client and
//! the per-device session machinery built on top of it.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod session;

#[cfg(test)]
mod tests;

pub use client::{Client, Transport};
pub use config::LanConfig;
pub use manager::DeviceManager;
pub use protocol::{Message, Payload};
pub use session::DeviceSession;

use std::net::Ipv4Addr;

pub const LIFX_PORT: u16 = 56700;
pub const DEFAULT_BROADCAST_IP: Ipv4Addr = Ipv4Addr::BROADCAST;
pub const DEFAULT_BROADCAST_ADDRESS: &str = "255.255.255.255";
pub const DEFAULT_BROADCAST_TARGET: &str =
    const_format::concatcp!(DEFAULT_BROADCAST_ADDRESS, ":", LIFX_PORT);

/// Receive buffer size; every LIFX datagram fits.
pub const RECV_BUFFER_SIZE: usize = 1024;
