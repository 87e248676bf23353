//! Protocol document decoder.
//!
//! The document is a YAML mapping with up to four sections:
//!
//! ```yaml
//! enums:    { Name: { type: uint8, values: [{ name: A, value: 0 }] } }
//! fields:   { Name: { size_bytes: 8, fields: [...] } }
//! unions:   { Name: { size_bytes: 16, fields: [...] } }
//! packets:  { namespace: { Name: { pkt_type: 2, size_bytes: 0, fields: [] } } }
//! ```
//!
//! Decoding is all-or-nothing: the first malformed entry fails the whole
//! document with its key path.

pub mod types;

pub use types::{
    Enum, EnumValue, Field, FieldGroup, Packet, ProtocolSpec, RESERVED, SizeMismatch, Union,
};

use crate::error::FormatError;
use crate::generate::naming::snake_ident;
use types::Named;

use std::collections::HashMap;

use log::debug;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

const ENUMS: &str = "enums";
const FIELDS: &str = "fields";
const UNIONS: &str = "unions";
const PACKETS: &str = "packets";

/// Module names the generated `packets` module already uses for its own
/// imports and its mounting file.
const TAKEN_NAMESPACES: &[&str] = &["enums", "fields", "unions", "wire", "helpers"];

/// Decodes a protocol document into its intermediate representation.
pub fn decode(document: &[u8]) -> Result<ProtocolSpec, FormatError> {
    let root: Value = serde_yaml::from_slice(document).map_err(FormatError::parse)?;
    let Value::Mapping(root) = root else {
        return Err(FormatError::structure(
            "<root>",
            format!("expected a mapping, found {}", kind_of(&root)),
        ));
    };

    let spec = ProtocolSpec {
        enums: decode_section(&root, ENUMS)?,
        fields: decode_section(&root, FIELDS)?,
        unions: decode_section(&root, UNIONS)?,
        packets: decode_packets(&root)?,
    };
    validate(&spec)?;

    debug!(
        "Decoded protocol: {} enums, {} field groups, {} unions, {} packets",
        spec.enums.len(),
        spec.fields.len(),
        spec.unions.len(),
        spec.packets.len()
    );
    Ok(spec)
}

/// Decodes one `name -> definition` section. A missing or empty (`null`)
/// section decodes as no entries.
fn decode_section<T>(root: &Mapping, section: &str) -> Result<Vec<T>, FormatError>
where
    T: DeserializeOwned + Named,
{
    match section_mapping(root, section)? {
        Some(entries) => decode_named_map(entries, section),
        None => Ok(Vec::new()),
    }
}

fn decode_packets(root: &Mapping) -> Result<Vec<Packet>, FormatError> {
    let Some(namespaces) = section_mapping(root, PACKETS)? else {
        return Ok(Vec::new());
    };

    let mut packets = Vec::new();
    for (key, value) in namespaces {
        let namespace = key_name(key, PACKETS)?;
        let path = format!("{PACKETS}.{namespace}");
        let entries = match value {
            Value::Mapping(entries) => entries,
            Value::Null => continue,
            other => {
                return Err(FormatError::structure(
                    path,
                    format!("expected a mapping of packets, found {}", kind_of(other)),
                ));
            }
        };

        for mut packet in decode_named_map::<Packet>(entries, &path)? {
            packet.namespace = namespace.clone();
            packets.push(packet);
        }
    }
    Ok(packets)
}

fn section_mapping<'a>(root: &'a Mapping, section: &str) -> Result<Option<&'a Mapping>, FormatError> {
    match root.get(section) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(entries)) => Ok(Some(entries)),
        Some(other) => Err(FormatError::structure(
            section,
            format!("expected a mapping, found {}", kind_of(other)),
        )),
    }
}

fn decode_named_map<T>(entries: &Mapping, path: &str) -> Result<Vec<T>, FormatError>
where
    T: DeserializeOwned + Named,
{
    let mut decoded = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let name = key_name(key, path)?;
        let entry_path = format!("{path}.{name}");
        if !value.is_mapping() {
            return Err(FormatError::structure(
                entry_path,
                format!("expected a mapping, found {}", kind_of(value)),
            ));
        }

        let mut entry: T = serde_yaml::from_value(value.clone())
            .map_err(|e| FormatError::entry(&entry_path, e.to_string()))?;
        entry.set_name(name);
        decoded.push(entry);
    }
    Ok(decoded)
}

fn key_name(key: &Value, path: &str) -> Result<String, FormatError> {
    match key {
        Value::String(name) if !name.is_empty() => Ok(name.clone()),
        other => Err(FormatError::structure(
            path,
            format!("expected a non-empty string key, found {}", kind_of(other)),
        )),
    }
}

fn validate(spec: &ProtocolSpec) -> Result<(), FormatError> {
    let mut by_code: HashMap<u16, &Packet> = HashMap::new();
    let mut by_name: HashMap<&str, &Packet> = HashMap::new();

    for packet in &spec.packets {
        let module = snake_ident(&packet.namespace);
        if TAKEN_NAMESPACES.contains(&module.trim_start_matches("r#")) {
            return Err(FormatError::structure(
                format!("{PACKETS}.{}", packet.namespace),
                format!("namespace {module} collides with a generated module"),
            ));
        }
        if let Some(first) = by_code.insert(packet.pkt_type, packet) {
            return Err(FormatError::validation(format!(
                "pkt_type {} is used by both {}.{} and {}.{}",
                packet.pkt_type, first.namespace, first.name, packet.namespace, packet.name
            )));
        }
        if let Some(first) = by_name.insert(packet.name.as_str(), packet) {
            return Err(FormatError::validation(format!(
                "packet name {} is declared in both {} and {}",
                packet.name, first.namespace, packet.namespace
            )));
        }
    }

    for definition in &spec.enums {
        let mut seen: HashMap<&str, i64> = HashMap::new();
        for value in definition.values.iter().filter(|v| !v.is_reserved()) {
            if seen.insert(value.name.as_str(), value.value).is_some() {
                return Err(FormatError::validation(format!(
                    "enum {} declares value {} more than once",
                    definition.name, value.name
                )));
            }
        }
    }

    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
