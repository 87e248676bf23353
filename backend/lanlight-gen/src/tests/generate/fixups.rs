use crate::decode::{Enum, EnumValue, Field, Packet};
use crate::generate::fixups::{
    by_namespace, name_reserved, reserved_type, sorted_by_type, strip_reserved, usable_enums,
};

fn field(name: &str, ty: &str, size_bytes: usize) -> Field {
    Field {
        name: name.to_string(),
        ty: ty.to_string(),
        size_bytes,
    }
}

fn placeholder(size_bytes: usize) -> Field {
    field("", "reserved", size_bytes)
}

fn packet(namespace: &str, name: &str, pkt_type: u16) -> Packet {
    Packet {
        name: name.to_string(),
        namespace: namespace.to_string(),
        pkt_type,
        size_bytes: 0,
        fields: Vec::new(),
    }
}

/// **VALUE**: Pins the width → primitive table for placeholders.
///
/// **BUG THIS CATCHES**: A 3-byte placeholder typed as `uint32` would shift
/// every following field by one byte on the wire.
#[test]
fn given_placeholder_widths_when_reserved_type_then_exact_mapping() {
    assert_eq!(reserved_type(1), "uint8");
    assert_eq!(reserved_type(2), "uint16");
    assert_eq!(reserved_type(4), "uint32");
    assert_eq!(reserved_type(8), "uint64");
    assert_eq!(reserved_type(3), "[3]byte");
    assert_eq!(reserved_type(10), "[10]byte");
    assert_eq!(reserved_type(32), "[32]byte");
}

/// **VALUE**: Placeholders are numbered 1..K in order with no gaps.
#[test]
fn given_interleaved_placeholders_when_name_reserved_then_numbered_in_order() {
    // GIVEN
    let fields = vec![
        placeholder(1),
        field("Level", "uint16", 2),
        placeholder(4),
        placeholder(6),
    ];

    // WHEN
    let named = name_reserved(&fields);

    // THEN
    let names: Vec<&str> = named.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Reserved1", "Level", "Reserved2", "Reserved3"]);
    assert_eq!(named[0].ty, "uint8");
    assert_eq!(named[2].ty, "uint32");
    assert_eq!(named[3].ty, "[6]byte");
    assert_eq!(named[1], fields[1]);
}

#[test]
fn given_two_containers_when_name_reserved_then_numbering_restarts() {
    let first = name_reserved(&[placeholder(2), placeholder(2)]);
    let second = name_reserved(&[placeholder(8)]);

    assert_eq!(first[1].name, "Reserved2");
    assert_eq!(second[0].name, "Reserved1");
}

#[test]
fn given_union_fields_when_strip_reserved_then_only_named_interpretations_remain() {
    let stripped = strip_reserved(&[field("Relays", "[16]byte", 16), placeholder(16)]);
    assert_eq!(stripped.len(), 1);
    assert_eq!(stripped[0].name, "Relays");
}

/// **VALUE**: An enum whose values are all "reserved" disappears; other enums
/// just lose their reserved values.
#[test]
fn given_reserved_only_enum_when_usable_enums_then_enum_is_omitted() {
    // GIVEN
    let entry = |name: &str, value: i64| EnumValue {
        name: name.to_string(),
        value,
    };
    let enums = vec![
        Enum {
            name: "Unused".to_string(),
            ty: "uint8".to_string(),
            values: vec![entry("reserved", 0), entry("RESERVED", 1)],
        },
        Enum {
            name: "DeviceService".to_string(),
            ty: "uint8".to_string(),
            values: vec![entry("DEVICE_SERVICE_UDP", 1), entry("reserved", 2)],
        },
    ];

    // WHEN
    let usable = usable_enums(&enums);

    // THEN
    assert_eq!(usable.len(), 1);
    assert_eq!(usable[0].name, "DeviceService");
    assert_eq!(usable[0].values, vec![entry("DEVICE_SERVICE_UDP", 1)]);
}

#[test]
fn given_unordered_packets_when_sorted_by_type_then_ascending() {
    let packets = vec![
        packet("light", "LightOn", 117),
        packet("device", "DeviceGetService", 2),
        packet("light", "LightGet", 101),
    ];

    let codes: Vec<u16> = sorted_by_type(&packets).iter().map(|p| p.pkt_type).collect();
    assert_eq!(codes, [2, 101, 117]);
}

#[test]
fn given_packets_when_by_namespace_then_first_seen_namespace_order() {
    let packets = vec![
        packet("light", "LightGet", 101),
        packet("device", "DeviceGetService", 2),
        packet("light", "LightOn", 117),
    ];

    let groups = by_namespace(&packets);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "light");
    assert_eq!(groups[1].0, "device");
    let light: Vec<&str> = groups[0].1.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(light, ["LightGet", "LightOn"]);
}
