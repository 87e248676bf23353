// Unit tests for argument parsing

use crate::cli::{Cli, Command, PowerState};

use clap::Parser;

#[test]
fn given_power_arguments_when_parsed_then_target_and_state_are_captured() {
    // WHEN
    let cli = Cli::try_parse_from(["lanlight", "power", "Kitchen", "off"]).unwrap();

    // THEN
    match cli.command {
        Command::Power {
            target,
            state,
            wait_ms,
        } => {
            assert_eq!(target, "Kitchen");
            assert_eq!(state, PowerState::Off);
            assert_eq!(wait_ms, 2_000);
        }
        other => panic!("Expected Power, got {other:?}"),
    }
}

#[test]
fn given_color_flags_when_parsed_then_only_given_components_are_set() {
    // WHEN
    let cli = Cli::try_parse_from([
        "lanlight",
        "color",
        "d073d5010203",
        "--hue",
        "240",
        "--kelvin",
        "3500",
    ])
    .unwrap();

    // THEN
    let Command::Color {
        hue,
        saturation,
        brightness,
        kelvin,
        duration_ms,
        ..
    } = cli.command
    else {
        panic!("Expected Color");
    };
    assert_eq!(hue, Some(240.0));
    assert_eq!(saturation, None);
    assert_eq!(brightness, None);
    assert_eq!(kelvin, Some(3500));
    assert_eq!(duration_ms, 1_000);
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_they_apply() {
    let cli = Cli::try_parse_from(["lanlight", "devices", "--json", "-v"]).unwrap();

    assert!(cli.verbose);
    assert!(matches!(cli.command, Command::Devices { json: true, .. }));
}

#[test]
fn given_unknown_power_state_when_parsed_then_error() {
    let result = Cli::try_parse_from(["lanlight", "power", "Kitchen", "dim"]);

    assert!(result.is_err());
}
