// Unit tests for code generated from a minimal protocol document: one enum,
// one reserved-only field group and one field-less packet.

mod generated {
    pub(crate) use crate::protocol::wire;

    #[allow(clippy::all, dead_code, unused_imports)]
    pub mod enums {
        include!(concat!(env!("OUT_DIR"), "/scenario/enums.rs"));
    }

    #[allow(clippy::all, dead_code, unused_imports)]
    pub mod fields {
        include!(concat!(env!("OUT_DIR"), "/scenario/fields.rs"));
    }

    #[allow(clippy::all, dead_code, unused_imports)]
    pub mod unions {
        include!(concat!(env!("OUT_DIR"), "/scenario/unions.rs"));
    }

    #[allow(clippy::all, dead_code, unused_imports)]
    pub mod packets {
        include!(concat!(env!("OUT_DIR"), "/scenario/packets/helpers.rs"));
    }

    #[allow(clippy::all, dead_code, unused_imports)]
    pub mod payloads {
        include!(concat!(env!("OUT_DIR"), "/scenario/payloads.rs"));
    }
}

use generated::enums::PowerLevel;
use generated::fields::Padding;
use generated::packets::{self, LightOn};
use generated::payloads::{Payload, REGISTRY, lookup};

use crate::protocol::wire::{Packet, Wire};

/// **VALUE**: The generated registry resolves type 117 to a decoder that turns
/// an empty body into the field-less `LightOn` packet.
///
/// **WHY THIS MATTERS**: Field-less requests (`Get*` packets) are the most
/// common traffic; each must decode from zero bytes.
///
/// **BUG THIS CATCHES**: Would catch a registry row missing for a packet with
/// no fields, or a decoder that demands bytes a zero-size packet never has.
#[test]
fn given_empty_body_when_decoding_type_117_then_light_on() {
    // GIVEN
    let decoder = lookup(117).expect("LightOn registered at 117");

    // WHEN
    let payload = decoder(&[]).unwrap();

    // THEN
    assert_eq!(payload, Payload::LightOn(LightOn {}));
    assert_eq!(payload.pkt_type(), 117);
    assert_eq!(payload.name(), "LightOn");
    assert_eq!(payload.encoded_len(), 0);
    assert_eq!(Payload::decode(117, &[]).unwrap(), payload);
}

#[test]
fn given_single_packet_document_when_registry_inspected_then_only_117() {
    assert_eq!(REGISTRY.len(), 1);
    assert_eq!(REGISTRY[0].0, <LightOn as Packet>::PKT_TYPE);
    assert_eq!(packets::NAMESPACES, &["light"]);
    assert!(lookup(116).is_none());
    assert!(matches!(
        Payload::decode(116, &[1]).unwrap(),
        Payload::Unknown { pkt_type: 116, .. }
    ));
}

#[test]
fn given_power_level_enum_when_inspected_then_both_values_present() {
    assert_eq!(PowerLevel::OFF, PowerLevel(0));
    assert_eq!(PowerLevel::ON, PowerLevel(1));
    assert_eq!(PowerLevel::VALUES.len(), 2);
    assert_eq!(PowerLevel::from_name("on"), Some(PowerLevel::ON));
    assert!(!PowerLevel(2).is_known());
}

/// **VALUE**: The reserved run is exposed as `reserved1`, a 10-byte array.
#[test]
fn given_padding_group_when_encoded_then_reserved_run_is_ten_bytes() {
    // GIVEN
    let padding = Padding {
        reserved1: [0xaa; 10],
    };

    // WHEN
    let mut bytes = Vec::new();
    padding.encode(&mut bytes);

    // THEN
    assert_eq!(<Padding as Wire>::SIZE, 10);
    assert_eq!(bytes, vec![0xaa; 10]);
    assert_eq!(Padding::default().reserved1, [0u8; 10]);
}
