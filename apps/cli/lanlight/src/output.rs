//! Text rendering of command results.

use models::{Device, Serial};

use std::fmt::Write;
use std::net::SocketAddr;

const NO_LABEL: &str = "-";

/// One line per device, columns aligned on the longest label.
pub fn device_table(devices: &[Device]) -> String {
    let width = devices
        .iter()
        .map(|d| d.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(NO_LABEL.len());

    let mut out = String::new();
    for device in devices {
        let label = if device.label.is_empty() {
            NO_LABEL
        } else {
            device.label.as_str()
        };
        let power = if device.powered_on { "on" } else { "off" };
        let _ = writeln!(
            out,
            "{serial}  {label:<width$}  {power:<3}  h={hue:.0} s={sat:.0}% b={bri:.0}% {kelvin}K  {address}",
            serial = device.serial,
            hue = device.color.hue,
            sat = device.color.saturation,
            bri = device.color.brightness,
            kelvin = device.color.kelvin,
            address = device.address,
        );
    }
    out
}

/// Responders to a single discovery broadcast.
pub fn scan_table(responders: &[(Serial, SocketAddr)]) -> String {
    let mut out = String::new();
    for (serial, address) in responders {
        let _ = writeln!(out, "{serial}  {address}");
    }
    out
}
