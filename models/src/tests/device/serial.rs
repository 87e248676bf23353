use crate::{ModelError, Serial};

#[test]
fn given_mac_hex_when_parsed_then_pads_trailing_bytes() {
    let serial: Serial = "d073d5012345".parse().unwrap();

    assert_eq!(serial.0, [0xd0, 0x73, 0xd5, 0x01, 0x23, 0x45, 0, 0]);
    assert_eq!(serial.to_string(), "d073d5012345");
}

#[test]
fn given_colon_separated_serial_when_parsed_then_separators_ignored() {
    let serial: Serial = "d0:73:d5:01:23:45".parse().unwrap();
    assert_eq!(serial.to_string(), "d073d5012345");
}

/// **VALUE**: A mistyped `--target` is rejected instead of matching nothing.
#[test]
fn given_malformed_serial_when_parsed_then_returns_validation_error() {
    for input in ["d073d5", "zz73d5012345", "d073d50123456", "é073d501234"] {
        let result = input.parse::<Serial>();
        assert!(
            matches!(result, Err(ModelError::Validation { .. })),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn given_zero_serial_then_is_broadcast() {
    assert!(Serial::BROADCAST.is_nil());
    assert!(!Serial([1, 0, 0, 0, 0, 0, 0, 0]).is_nil());
}
