// Unit tests for the generated protocol types and registry

use crate::protocol::enums::{DeviceService, LightWaveform};
use crate::protocol::packets::{
    self, DeviceStateHostFirmware, DeviceStateLabel, LightState, LightSetWaveformOptional,
};
use crate::protocol::payloads::{Payload, REGISTRY, lookup};
use crate::protocol::wire::{Packet, Wire};

#[test]
fn given_registry_when_inspected_then_type_codes_ascend_strictly() {
    assert!(!REGISTRY.is_empty());
    assert!(
        REGISTRY.windows(2).all(|pair| pair[0].0 < pair[1].0),
        "Registry must be sorted for binary search"
    );
}

/// **VALUE**: Every registered decoder yields the packet its code names.
///
/// **BUG THIS CATCHES**: Would catch a registry row pointing at the wrong
/// packet type, which silently misroutes one message kind.
#[test]
fn given_each_registry_entry_when_decoding_zeroes_then_payload_reports_same_code() {
    let zeroes = [0u8; 1024];

    for (pkt_type, decoder) in REGISTRY {
        let payload = decoder(&zeroes).unwrap();
        assert_eq!(payload.pkt_type(), *pkt_type, "entry {}", payload.name());
        assert_eq!(lookup(*pkt_type).map(|d| d as usize), Some(*decoder as usize));
    }
}

#[test]
fn given_unregistered_code_when_lookup_then_none() {
    assert!(lookup(0).is_none());
    assert!(lookup(u16::MAX).is_none());
}

#[test]
fn given_generated_packets_when_inspected_then_sizes_match_protocol() {
    assert_eq!(LightState::SIZE, 52);
    assert_eq!(DeviceStateLabel::SIZE, 32);
    assert_eq!(DeviceStateHostFirmware::SIZE, 20);
    assert_eq!(LightSetWaveformOptional::SIZE, 25);
    assert_eq!(<LightState as Packet>::PKT_TYPE, 107);
    assert_eq!(<LightState as Packet>::NAME, "LightState");
}

#[test]
fn given_namespaces_when_listed_then_every_document_namespace_is_present() {
    for namespace in ["device", "light", "multi_zone", "relay", "button"] {
        assert!(
            packets::NAMESPACES.contains(&namespace),
            "missing namespace {namespace}"
        );
    }
}

#[test]
fn given_enum_when_looking_up_by_name_or_label_then_constant_is_found() {
    assert_eq!(LightWaveform::from_name("LIGHT_WAVEFORM_HALF_SINE"), Some(LightWaveform::HALF_SINE));
    assert_eq!(LightWaveform::from_label("half sine"), Some(LightWaveform::HALF_SINE));
    assert_eq!(LightWaveform::SAW.label(), Some("Saw"));
    assert_eq!(DeviceService::UDP.0, 1);
}

/// **VALUE**: Values the table does not name still round-trip.
///
/// **BUG THIS CATCHES**: Would catch an enum decoder that rejects or rewrites
/// codes newer firmware sends, dropping the whole message.
#[test]
fn given_unnamed_enum_value_when_decoded_then_value_is_kept() {
    // GIVEN
    let mut buf: &[u8] = &[42];

    // WHEN
    let waveform = LightWaveform::decode(&mut buf).unwrap();

    // THEN
    assert_eq!(waveform.0, 42);
    assert!(!waveform.is_known());
    assert_eq!(waveform.name(), None);
}

#[test]
fn given_light_state_bytes_when_decode_then_fields_land_in_order() {
    // GIVEN
    let mut body = Vec::new();
    for value in [0x1111u16, 0x2222, 0x3333, 3500] {
        body.extend_from_slice(&value.to_le_bytes());
    }
    body.extend_from_slice(&[0, 0]);
    body.extend_from_slice(&65535u16.to_le_bytes());
    let mut label = [0u8; 32];
    label[..4].copy_from_slice(b"Desk");
    body.extend_from_slice(&label);
    body.extend_from_slice(&[0; 8]);

    // WHEN
    let payload = Payload::decode(107, &body).unwrap();

    // THEN
    let Payload::LightState(state) = payload else {
        panic!("Expected LightState, got {payload:?}");
    };
    assert_eq!(state.color.hue, 0x1111);
    assert_eq!(state.color.brightness, 0x3333);
    assert_eq!(state.color.kelvin, 3500);
    assert_eq!(state.power, 65535);
    assert_eq!(&state.label[..4], b"Desk");
}
