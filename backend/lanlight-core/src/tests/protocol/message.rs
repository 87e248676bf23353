// Unit tests for the datagram envelope

use crate::error::wire::WireError;
use crate::protocol::message::{HEADER_SIZE, Message};
use crate::protocol::packets::{DeviceGetService, DeviceSetPower, LightGet};
use crate::protocol::payloads::Payload;

use models::Serial;

const SERIAL: Serial = Serial([0xd0, 0x73, 0xd5, 0x01, 0x02, 0x03, 0, 0]);

#[test]
fn given_broadcast_request_when_encode_then_header_fields_are_on_the_wire() {
    // GIVEN
    let mut message = Message::new(DeviceGetService::default());
    message.set_source(0xdead_beef);
    message.set_sequence(9);

    // WHEN
    let bytes = message.encode().unwrap();

    // THEN
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(&bytes[0..2], &[36, 0], "size");
    assert_eq!(&bytes[2..4], &[0x00, 0x34], "protocol 1024, addressable, tagged");
    assert_eq!(&bytes[4..8], &0xdead_beef_u32.to_le_bytes());
    assert_eq!(&bytes[8..16], &[0; 8], "broadcast target");
    assert_eq!(bytes[23], 9, "sequence");
    assert_eq!(&bytes[32..34], &[2, 0], "pkt_type");
}

/// **VALUE**: The tagged bit tracks the target, whatever the header said before.
///
/// **BUG THIS CATCHES**: Would catch a message addressed to one device still
/// going out tagged, which makes every device on the LAN act on it.
#[test]
fn given_device_target_when_encode_then_tagged_bit_is_clear() {
    // GIVEN
    let mut message = Message::new(DeviceSetPower { level: 65535 });
    message.set_target(SERIAL);

    // WHEN
    let bytes = message.encode().unwrap();

    // THEN
    assert_eq!(&bytes[2..4], &[0x00, 0x14], "protocol 1024, addressable only");
    assert_eq!(&bytes[8..16], SERIAL.as_bytes());
    assert_eq!(&bytes[36..38], &[0xff, 0xff]);
}

#[test]
fn given_encoded_message_when_decode_then_header_and_payload_match() {
    // GIVEN
    let mut message = Message::new(DeviceSetPower { level: 0 });
    message.set_target(SERIAL);
    message.set_source(42);
    message.set_sequence(200);
    let bytes = message.encode().unwrap();

    // WHEN
    let decoded = Message::decode(&bytes).unwrap();

    // THEN
    assert_eq!(decoded.header.size as usize, bytes.len());
    assert_eq!(decoded.header.source, 42);
    assert_eq!(decoded.header.sequence, 200);
    assert_eq!(decoded.target(), SERIAL);
    assert!(!decoded.header.tagged);
    assert_eq!(decoded.payload, Payload::DeviceSetPower(DeviceSetPower { level: 0 }));
}

#[test]
fn given_datagram_shorter_than_header_when_decode_then_truncated() {
    let result = Message::decode(&[0u8; 20]);

    assert!(matches!(result, Err(WireError::Truncated { .. })));
}

#[test]
fn given_size_field_disagreeing_with_length_when_decode_then_header_error() {
    // GIVEN
    let mut bytes = Message::new(LightGet::default()).encode().unwrap();
    bytes.push(0);

    // WHEN
    let result = Message::decode(&bytes);

    // THEN
    assert!(matches!(result, Err(WireError::Header { .. })));
}

#[test]
fn given_wrong_protocol_number_when_decode_then_header_error() {
    // GIVEN
    let mut bytes = Message::new(LightGet::default()).encode().unwrap();
    bytes[2] = 0x01;

    // WHEN
    let result = Message::decode(&bytes);

    // THEN
    assert!(matches!(result, Err(WireError::Header { .. })));
}

#[test]
fn given_unregistered_type_when_decode_then_body_is_kept_as_unknown() {
    // GIVEN
    let mut bytes = Message::new(LightGet::default()).encode().unwrap();
    bytes[32..34].copy_from_slice(&9999u16.to_le_bytes());
    bytes.extend_from_slice(&[1, 2, 3]);
    bytes[0] = bytes.len() as u8;

    // WHEN
    let message = Message::decode(&bytes).unwrap();

    // THEN
    assert_eq!(
        message.payload,
        Payload::Unknown {
            pkt_type: 9999,
            bytes: vec![1, 2, 3]
        }
    );
    assert_eq!(message.payload.name(), "Unknown");
}

#[test]
fn given_registered_type_with_short_body_when_decode_then_truncated() {
    // GIVEN: DeviceSetPower needs 2 body bytes
    let mut bytes = Message::new(LightGet::default()).encode().unwrap();
    bytes[32..34].copy_from_slice(&21u16.to_le_bytes());
    bytes.push(0xff);
    bytes[0] = bytes.len() as u8;

    // WHEN
    let result = Message::decode(&bytes);

    // THEN
    assert!(matches!(result, Err(WireError::Truncated { .. })));
}
