use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Discover and control LIFX devices on the local network.
#[derive(Debug, Parser)]
#[command(name = "lanlight", version)]
pub struct Cli {
    /// Log everything, down to individual datagrams
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding lanlight.toml (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Broadcast one discovery request and list whoever answers
    Scan {
        #[arg(long, default_value_t = 2_000)]
        timeout_ms: u64,
    },

    /// Discover devices, wait for their state, and print it
    Devices {
        #[arg(long)]
        json: bool,

        #[arg(long, default_value_t = 2_000)]
        wait_ms: u64,
    },

    /// Switch a device on or off
    Power {
        /// Serial (12 or 16 hex digits) or label
        target: String,

        state: PowerState,

        #[arg(long, default_value_t = 2_000)]
        wait_ms: u64,
    },

    /// Change any subset of a light's color components
    Color {
        /// Serial (12 or 16 hex digits) or label
        target: String,

        /// Degrees, 0-360
        #[arg(long)]
        hue: Option<f64>,

        /// Percent, 0-100
        #[arg(long)]
        saturation: Option<f64>,

        /// Percent, 0-100
        #[arg(long)]
        brightness: Option<f64>,

        #[arg(long)]
        kelvin: Option<u16>,

        #[arg(long, default_value_t = 1_000)]
        duration_ms: u64,

        #[arg(long, default_value_t = 2_000)]
        wait_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PowerState {
    On,
    Off,
}
