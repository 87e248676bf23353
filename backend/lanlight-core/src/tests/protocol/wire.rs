// Unit tests for the little-endian codec

use crate::error::wire::WireError;
use crate::protocol::wire::{Wire, label_from_bytes, label_to_bytes};

#[test]
fn given_u32_when_encode_then_bytes_are_little_endian() {
    // GIVEN
    let value: u32 = 0x0102_0304;
    let mut buf = Vec::new();

    // WHEN
    value.encode(&mut buf);

    // THEN
    assert_eq!(buf, vec![0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn given_short_buffer_when_decode_u64_then_truncated_error() {
    // GIVEN
    let mut buf: &[u8] = &[1, 2, 3];

    // WHEN
    let result = u64::decode(&mut buf);

    // THEN
    assert!(matches!(result, Err(WireError::Truncated { .. })));
}

#[test]
fn given_nonzero_byte_when_decode_bool_then_true() {
    let mut buf: &[u8] = &[7];

    assert!(bool::decode(&mut buf).unwrap());
}

#[test]
fn given_array_when_decode_then_elements_follow_in_order() {
    // GIVEN
    let mut buf: &[u8] = &[0x01, 0x00, 0x02, 0x00, 0xff];

    // WHEN
    let values = <[u16; 2]>::decode(&mut buf).unwrap();

    // THEN
    assert_eq!(values, [1, 2]);
    assert_eq!(buf, &[0xff], "Trailing byte must be left unread");
    assert_eq!(<[u16; 2]>::SIZE, 4);
}

#[test]
fn given_nul_padded_label_when_read_then_padding_is_dropped() {
    // GIVEN
    let mut bytes = [0u8; 32];
    bytes[..7].copy_from_slice(b"Kitchen");

    // WHEN / THEN
    assert_eq!(label_from_bytes(&bytes), "Kitchen");
}

#[test]
fn given_label_without_nul_when_read_then_whole_field_is_used() {
    let bytes = [b'a'; 4];

    assert_eq!(label_from_bytes(&bytes), "aaaa");
}

/// **VALUE**: Long labels are cut without splitting a multi-byte character.
///
/// **BUG THIS CATCHES**: Would catch a byte-level cut that leaves half of a
/// UTF-8 sequence in the field, which devices then show as garbage.
#[test]
fn given_label_longer_than_field_when_written_then_cut_at_char_boundary() {
    // GIVEN: "é" is two bytes, so the third character straddles byte 4
    let label = "aaaé";

    // WHEN
    let bytes: [u8; 4] = label_to_bytes(label);

    // THEN
    assert_eq!(&bytes, b"aaa\0");
    assert_eq!(label_from_bytes(&bytes), "aaa");
}
