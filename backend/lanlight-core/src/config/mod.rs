use crate::error::config::ConfigError;
use crate::{DEFAULT_BROADCAST_ADDRESS, LIFX_PORT};

use common::ErrorLocation;

use std::net::{IpAddr, SocketAddr};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "lanlight.toml";
const CONFIG_DIR_NAME: &str = "lanlight";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Source identifier stamped on every outbound message. `0` means
    /// "generate one".
    #[serde(default)]
    pub source: u32,
    /// Default deadline for one-shot receives.
    #[serde(default = "default_receive_deadline_ms")]
    pub receive_deadline_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            source: 0,
            receive_deadline_ms: default_receive_deadline_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_broadcast_address")]
    pub broadcast_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            broadcast_address: default_broadcast_address(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_period_secs")]
    pub refresh_period_secs: u64,
    #[serde(default = "default_inbound_capacity")]
    pub inbound_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            refresh_period_secs: default_refresh_period_secs(),
            inbound_capacity: default_inbound_capacity(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_receive_deadline_ms() -> u64 {
    2_000
}
fn default_broadcast_address() -> String {
    DEFAULT_BROADCAST_ADDRESS.to_string()
}
fn default_port() -> u16 {
    LIFX_PORT
}
fn default_refresh_period_secs() -> u64 {
    10
}
fn default_inbound_capacity() -> usize {
    10
}

// ============================================
// IMPLEMENTATION
// ============================================

impl LanConfig {
    /// `{config_dir}/lanlight`, e.g. `~/.config/lanlight` on Linux.
    #[track_caller]
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| ConfigError::DirectoryNotFound {
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Load config from `{config_dir}/lanlight.toml`.
    ///
    /// A missing file yields defaults; a file that exists but does not parse
    /// or validate is an error.
    #[track_caller]
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config = Self::parse(&contents).map_err(|reason| {
            warn!("Failed to parse config TOML: {reason}");
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason,
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.inbound_capacity == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "session.inbound_capacity must be at least 1".to_string(),
            });
        }

        if self.session.refresh_period_secs == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "session.refresh_period_secs must be at least 1".to_string(),
            });
        }

        if self.discovery.broadcast_address.parse::<IpAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid broadcast address: {}",
                    self.discovery.broadcast_address
                ),
            });
        }

        Ok(())
    }

    /// Source identifier to stamp: the configured one, or a random nonzero
    /// value when none is configured.
    pub fn source(&self) -> u32 {
        if self.client.source != 0 {
            return self.client.source;
        }
        let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
        ((high ^ low) as u32).max(1)
    }

    /// Broadcast destination for discovery. Falls back to the limited
    /// broadcast address if the configured one does not parse.
    pub fn broadcast_addr(&self) -> SocketAddr {
        let ip = self
            .discovery
            .broadcast_address
            .parse()
            .unwrap_or_else(|_| {
                warn!(
                    "Invalid broadcast address {}, using {DEFAULT_BROADCAST_ADDRESS}",
                    self.discovery.broadcast_address
                );
                IpAddr::from(crate::DEFAULT_BROADCAST_IP)
            });
        SocketAddr::new(ip, self.discovery.port)
    }

    pub fn receive_deadline(&self) -> Duration {
        Duration::from_millis(self.client.receive_deadline_ms)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.session.refresh_period_secs)
    }
}
