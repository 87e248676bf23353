use std::process::Command;

use tempfile::TempDir;

fn lanlight(config_dir: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lanlight"));
    command.arg("--config-dir").arg(config_dir.path());
    command
}

#[test]
fn given_help_flag_when_run_then_subcommands_are_listed() {
    let dir = TempDir::new().unwrap();

    let output = lanlight(&dir).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["scan", "devices", "power", "color"] {
        assert!(stdout.contains(subcommand), "help is missing {subcommand}");
    }
}

/// **VALUE**: Invalid input fails with a non-zero exit and says why.
///
/// **BUG THIS CATCHES**: Would catch the binary exiting 0 on errors, which
/// breaks scripts that chain lanlight commands.
#[test]
fn given_color_without_components_when_run_then_exit_status_is_failure() {
    // WHEN
    let dir = TempDir::new().unwrap();
    let output = lanlight(&dir).args(["color", "Kitchen"]).output().unwrap();

    // THEN
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Argument Error"), "stderr was: {stderr}");
}

#[test]
fn given_corrupt_config_when_run_then_exit_status_is_failure() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("lanlight.toml"), "[session\n").unwrap();

    // WHEN
    let output = lanlight(&dir).args(["scan", "--timeout-ms", "10"]).output().unwrap();

    // THEN
    assert!(!output.status.success());
}
