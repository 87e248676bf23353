use crate::testdata;

use std::process::Command;

use tempfile::TempDir;

const BINARY: &str = env!("CARGO_BIN_EXE_lanlight-gen");

#[test]
fn given_valid_document_when_binary_runs_then_exits_successfully() {
    let dir = TempDir::new().unwrap();

    let status = Command::new(BINARY)
        .arg(testdata("scenario.yml"))
        .arg(dir.path())
        .status()
        .unwrap();

    assert!(status.success());
    assert!(dir.path().join("payloads.rs").exists());
}

/// **VALUE**: A failing run exits non-zero so build pipelines stop.
#[test]
fn given_missing_document_when_binary_runs_then_exits_with_failure() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(BINARY)
        .arg(dir.path().join("missing.yml"))
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.yml"), "{stderr}");
}
