// Unit tests for the render → format → write pipeline and template failures

use crate::decode::decode;
use crate::error::GenerationError;
use crate::generate::{format_source, generate, generate_from_template};

use std::fs;

use tempfile::TempDir;

#[test]
fn given_valid_source_when_format_source_then_pretty_printed() {
    let formatted = format_source("templates/test", "pub struct A{pub b:u8,}").unwrap();
    assert_eq!(formatted, "pub struct A {\n    pub b: u8,\n}\n");
}

/// **VALUE**: A template that renders invalid Rust fails with the template
/// path and leaves nothing on disk.
///
/// **BUG THIS CATCHES**: Writing the raw source before formatting would leave
/// a broken file behind for the next build to trip over.
#[test]
fn given_invalid_render_when_generate_from_template_then_format_error_and_no_file() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("broken.rs");

    // WHEN
    let err = generate_from_template("templates/broken", &output, |out| {
        out.push_str("pub struct {");
        Ok(())
    })
    .unwrap_err();

    // THEN
    assert!(matches!(err, GenerationError::Format { .. }));
    assert_eq!(err.template(), Some("templates/broken"));
    assert!(err.to_string().contains("templates/broken"));
    assert!(!output.exists());
}

#[test]
fn given_render_failure_when_generate_from_template_then_error_is_returned_unchanged() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never.rs");

    let err = generate_from_template("templates/never", &output, |_| {
        Err(GenerationError::render("templates/never", "boom"))
    })
    .unwrap_err();

    assert!(matches!(err, GenerationError::Render { .. }));
    assert!(!output.exists());
}

#[test]
fn given_reference_to_undeclared_type_when_generate_then_render_error_names_field() {
    // GIVEN
    let spec = decode(
        br#"
packets:
  light:
    LightSetColor:
      pkt_type: 102
      size_bytes: 8
      fields:
        - { name: Color, type: "<Missing>", size_bytes: 8 }
"#,
    )
    .unwrap();
    let dir = TempDir::new().unwrap();

    // WHEN
    let err = generate(&spec, dir.path()).unwrap_err();

    // THEN
    assert_eq!(err.template(), Some("templates/namespace"));
    let message = err.to_string();
    assert!(message.contains("LightSetColor.Color"), "{message}");
    assert!(message.contains("<Missing>"), "{message}");
}

#[test]
fn given_enum_value_out_of_range_when_generate_then_render_error() {
    let spec = decode(
        br#"
enums:
  Small:
    type: uint8
    values:
      - { name: BIG, value: 300 }
"#,
    )
    .unwrap();
    let dir = TempDir::new().unwrap();

    let err = generate(&spec, dir.path()).unwrap_err();

    assert_eq!(err.template(), Some("templates/enums"));
}

#[test]
fn given_packet_named_unknown_when_generate_then_render_error() {
    let spec = decode(b"packets:\n  misc:\n    Unknown: { pkt_type: 9, size_bytes: 0 }\n").unwrap();
    let dir = TempDir::new().unwrap();

    let err = generate(&spec, dir.path()).unwrap_err();

    assert_eq!(err.template(), Some("templates/payloads"));
}

/// **VALUE**: An empty protocol still produces the full, mountable layout.
#[test]
fn given_empty_spec_when_generate_then_every_artifact_exists() {
    // GIVEN
    let spec = decode(b"{}").unwrap();
    let dir = TempDir::new().unwrap();

    // WHEN
    generate(&spec, dir.path()).unwrap();

    // THEN
    for file in [
        "enums.rs",
        "fields.rs",
        "unions.rs",
        "payloads.rs",
        "packets/helpers.rs",
    ] {
        let contents = fs::read_to_string(dir.path().join(file)).unwrap();
        assert!(contents.starts_with("// Generated by lanlight-gen"), "{file}");
    }
    let payloads = fs::read_to_string(dir.path().join("payloads.rs")).unwrap();
    assert!(payloads.contains("Unknown {"));
    assert!(payloads.contains("bytes: Vec<u8>"));
}
