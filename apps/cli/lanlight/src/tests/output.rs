// Unit tests for text output

use crate::output::{device_table, scan_table};

use models::{Color, Device, Serial};

use std::net::SocketAddr;

fn device(label: &str, last_byte: u8) -> Device {
    let address: SocketAddr = format!("192.168.1.{last_byte}:56700").parse().unwrap();
    let mut device = Device::new(address, Serial([0xd0, 0x73, 0xd5, 0, 0, last_byte, 0, 0]));
    device.label = label.to_string();
    device
}

#[test]
fn given_devices_when_rendered_then_one_aligned_line_each() {
    // GIVEN
    let mut lamp = device("Lamp", 10);
    lamp.powered_on = true;
    lamp.color = Color {
        hue: 120.0,
        saturation: 100.0,
        brightness: 50.0,
        kelvin: 3500,
    };
    let devices = vec![lamp, device("Ceiling Light", 11)];

    // WHEN
    let table = device_table(&devices);

    // THEN
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "d073d500000a  Lamp           on   h=120 s=100% b=50% 3500K  192.168.1.10:56700"
    );
    assert!(lines[1].starts_with("d073d500000b  Ceiling Light  off"));
}

#[test]
fn given_unlabelled_device_when_rendered_then_placeholder_is_shown() {
    let table = device_table(&[device("", 12)]);

    assert!(table.starts_with("d073d500000c  -  off"));
}

#[test]
fn given_no_responders_when_scan_rendered_then_output_is_empty() {
    assert!(scan_table(&[]).is_empty());
}
