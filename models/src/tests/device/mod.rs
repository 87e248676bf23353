mod color;
mod serial;

use crate::{Device, Serial, sort_devices};

use std::net::SocketAddr;

fn device(label: &str, last_byte: u8) -> Device {
    let address: SocketAddr = "192.168.1.20:56700".parse().unwrap();
    let mut device = Device::new(address, Serial([0xd0, 0x73, 0xd5, 0, 0, last_byte, 0, 0]));
    device.label = label.to_string();
    device
}

/// **VALUE**: Device lists render in a stable order.
///
/// **BUG THIS CATCHES**: Two bulbs sharing a label would swap places between
/// refreshes if the serial tiebreak were dropped.
#[test]
fn given_devices_with_shared_label_when_sorted_then_serial_breaks_tie() {
    // GIVEN: Unsorted devices, two of them labelled "Kitchen"
    let mut devices = vec![device("Kitchen", 2), device("Bedroom", 9), device("Kitchen", 1)];

    // WHEN: Sorting
    sort_devices(&mut devices);

    // THEN: Label order, serial order within a label
    let order: Vec<String> = devices.iter().map(|d| d.serial.to_string()).collect();
    assert_eq!(order, vec!["d073d5000009", "d073d5000001", "d073d5000002"]);
}

#[test]
fn given_unlabelled_device_when_display_name_then_falls_back_to_serial() {
    let unlabelled = device("", 0x0a);
    assert_eq!(unlabelled.display_name(), "d073d500000a");
    assert_eq!(device("Porch", 1).display_name(), "Porch");
}

#[test]
fn given_device_when_serialized_then_serial_is_hex_string() {
    let json = serde_json::to_value(device("Desk", 3)).unwrap();

    assert_eq!(json["serial"], "d073d5000003");
    assert_eq!(json["device_type"], "light");
    assert_eq!(json["light_type"], "single_zone");
}
