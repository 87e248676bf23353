use crate::testdata;

use lanlight_gen::{compile, decode, generate};

use std::fs;
use std::path::Path;

use tempfile::TempDir;

fn read(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join(file)).unwrap_or_else(|e| panic!("{file}: {e}"))
}

/// **VALUE**: The whole compiler on a small protocol: an enum, a padded field
/// group and a packet that references the enum.
///
/// **WHY THIS MATTERS**: This is the shape every real packet takes; if any
/// artifact drifts from the others the runtime crate stops compiling.
///
/// **BUG THIS CATCHES**: Would catch a wrong reserved name or width, an enum
/// reference rendered as a bare integer, or a missing registry entry.
#[test]
fn given_scenario_document_when_compile_then_all_artifacts_agree() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let spec = compile(&testdata("scenario.yml"), dir.path()).unwrap();

    // THEN
    assert_eq!(spec.packets.len(), 3);

    let enums = read(dir.path(), "enums.rs");
    assert!(enums.contains("pub struct PowerLevel(pub u16);"));
    assert!(enums.contains("pub const STANDBY: Self = Self(0);"));
    assert!(enums.contains("pub const ENABLED: Self = Self(65535);"));
    assert!(!enums.contains("Unused"), "all-reserved enum must be omitted");

    let fields = read(dir.path(), "fields.rs");
    assert!(fields.contains("pub struct Padding"));
    assert!(fields.contains("pub reserved1: [u8; 10],"));

    let unions = read(dir.path(), "unions.rs");
    assert!(unions.contains("pub fn as_raw(&self)"));
    assert!(unions.contains("pub fn from_halves(value: &[u16; 2])"));
    assert!(!unions.contains("reserved"));

    let light = read(dir.path(), "packets/light.rs");
    assert!(light.contains("pub struct LightOn"));
    assert!(light.contains("pub level: super::enums::PowerLevel,"));
    assert!(light.contains("const PKT_TYPE: u16 = 117;"));
    assert!(light.find("pub struct LightOn") < light.find("pub struct LightGet"));

    let helpers = read(dir.path(), "packets/helpers.rs");
    assert!(helpers.contains("include!(\"device.rs\");"));
    assert!(helpers.contains("include!(\"light.rs\");"));
    assert!(helpers.contains("pub use self::light::*;"));

    let payloads = read(dir.path(), "payloads.rs");
    assert!(payloads.contains("(117, decode_packet::<packets::LightOn> as Decoder)"));
}

/// **VALUE**: The smallest complete protocol: a two-value enum, a group made of
/// one reserved run and a field-less packet. `lanlight-core` builds the same
/// document and decodes through its registry.
///
/// **BUG THIS CATCHES**: Would catch an empty packet rendered without a
/// constructor or left out of the registry, or a reserved run that loses its
/// width.
#[test]
fn given_power_scenario_when_compile_then_light_on_is_registered_at_117() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let spec = compile(&testdata("power_scenario.yml"), dir.path()).unwrap();

    // THEN
    assert!(spec.size_mismatches().is_empty());

    let enums = read(dir.path(), "enums.rs");
    assert!(enums.contains("pub struct PowerLevel(pub u8);"));
    assert!(enums.contains("pub const OFF: Self = Self(0);"));
    assert!(enums.contains("pub const ON: Self = Self(1);"));

    let fields = read(dir.path(), "fields.rs");
    assert!(fields.contains("pub struct Padding"));
    assert!(fields.contains("pub reserved1: [u8; 10],"));

    let light = read(dir.path(), "packets/light.rs");
    assert!(light.contains("pub struct LightOn"));
    assert!(light.contains("impl Default for LightOn"));
    assert!(light.contains("const PKT_TYPE: u16 = 117;"));

    let helpers = read(dir.path(), "packets/helpers.rs");
    assert!(helpers.contains("pub const NAMESPACES: &[&str] = &[\"light\"];"));

    let payloads = read(dir.path(), "payloads.rs");
    assert!(payloads.contains("(117, decode_packet::<packets::LightOn> as Decoder)"));
}

/// **VALUE**: Registry entries are emitted in ascending type-code order, which
/// `lookup`'s binary search depends on.
#[test]
fn given_packets_out_of_order_when_generate_then_registry_is_ascending() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    compile(&testdata("scenario.yml"), dir.path()).unwrap();

    // WHEN
    let payloads = read(dir.path(), "payloads.rs");
    let position = |variant: &str| {
        payloads
            .find(&format!("decode_packet::<packets::{variant}> as Decoder"))
            .unwrap_or_else(|| panic!("{variant} missing from registry"))
    };

    // THEN
    assert!(position("DeviceGetService") < position("LightGet"));
    assert!(position("LightGet") < position("LightOn"));
}

#[test]
fn given_same_document_when_generated_twice_then_output_is_byte_identical() {
    // GIVEN
    let document = fs::read(testdata("scenario.yml")).unwrap();
    let spec = decode(&document).unwrap();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    // WHEN
    generate(&spec, first.path()).unwrap();
    generate(&decode(&document).unwrap(), second.path()).unwrap();

    // THEN
    for file in [
        "enums.rs",
        "fields.rs",
        "unions.rs",
        "payloads.rs",
        "packets/helpers.rs",
        "packets/device.rs",
        "packets/light.rs",
    ] {
        assert_eq!(read(first.path(), file), read(second.path(), file), "{file}");
    }
}

#[test]
fn given_namespace_with_separator_when_generate_then_snake_case_file() {
    let spec = decode(b"packets:\n  MultiZone:\n    MultiZoneGet: { pkt_type: 502, size_bytes: 0 }\n")
        .unwrap();
    let dir = TempDir::new().unwrap();

    generate(&spec, dir.path()).unwrap();

    assert!(dir.path().join("packets/multi_zone.rs").exists());
    let helpers = read(dir.path(), "packets/helpers.rs");
    assert!(helpers.contains("pub mod multi_zone"));
    assert!(helpers.contains("\"multi_zone\""));
}
