// Unit tests for LanConfig loading and validation

use crate::config::LanConfig;
use crate::error::config::ConfigError;
use crate::{DEFAULT_BROADCAST_TARGET, LIFX_PORT};

use std::time::Duration;

use tempfile::TempDir;

#[test]
fn given_no_config_file_when_load_then_defaults_are_returned() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let config = LanConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(config, LanConfig::default());
    assert_eq!(config.refresh_period(), Duration::from_secs(10));
    assert_eq!(config.session.inbound_capacity, 10);
    assert_eq!(config.broadcast_addr().to_string(), DEFAULT_BROADCAST_TARGET);
}

#[test]
fn given_partial_file_when_load_then_missing_keys_use_defaults() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("lanlight.toml"),
        "[discovery]\nbroadcast_address = \"192.168.1.255\"\n\n[session]\nrefresh_period_secs = 30\n",
    )
    .unwrap();

    // WHEN
    let config = LanConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(config.discovery.broadcast_address, "192.168.1.255");
    assert_eq!(config.discovery.port, LIFX_PORT);
    assert_eq!(config.refresh_period(), Duration::from_secs(30));
    assert_eq!(config.session.inbound_capacity, 10);
    assert_eq!(config.client.receive_deadline_ms, 2_000);
}

#[test]
fn given_corrupt_file_when_load_then_parse_error() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("lanlight.toml"), "[session\nrefresh").unwrap();

    // WHEN
    let result = LanConfig::load(dir.path());

    // THEN
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: A zero-capacity queue is rejected up front.
///
/// **BUG THIS CATCHES**: Would catch a config that makes every inbound
/// message drop, leaving devices permanently blank.
#[test]
fn given_zero_inbound_capacity_when_validate_then_validation_error() {
    // GIVEN
    let mut config = LanConfig::default();
    config.session.inbound_capacity = 0;

    // WHEN
    let result = config.validate();

    // THEN
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_zero_refresh_period_when_validate_then_validation_error() {
    let mut config = LanConfig::default();
    config.session.refresh_period_secs = 0;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn given_unparsable_broadcast_address_when_validate_then_validation_error() {
    let mut config = LanConfig::default();
    config.discovery.broadcast_address = "not-an-ip".to_string();

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn given_configured_source_when_source_then_it_is_used_verbatim() {
    let mut config = LanConfig::default();
    config.client.source = 77;

    assert_eq!(config.source(), 77);
}

#[test]
fn given_zero_source_when_source_then_a_nonzero_value_is_generated() {
    let config = LanConfig::default();

    assert_ne!(config.source(), 0);
}
