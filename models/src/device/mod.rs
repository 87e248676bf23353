pub mod color;
pub mod serial;

use crate::{Color, Serial};

use std::fmt;
use std::net::SocketAddr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    #[default]
    Light,
    Switch,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Light => f.write_str("light"),
            DeviceType::Switch => f.write_str("switch"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    #[default]
    SingleZone,
    MultiZone,
    Matrix,
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightType::SingleZone => f.write_str("single_zone"),
            LightType::MultiZone => f.write_str("multi_zone"),
            LightType::Matrix => f.write_str("matrix"),
        }
    }
}

/// Live state of one device on the LAN.
///
/// A device starts out with only its address and serial populated; the rest is
/// filled in as state reports arrive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub address: SocketAddr,
    pub serial: Serial,
    pub label: String,
    pub product_id: u32,
    pub firmware_version: String,
    pub device_type: DeviceType,
    pub light_type: LightType,
    pub location: String,
    pub group: String,
    pub color: Color,
    pub powered_on: bool,
}

impl Device {
    pub fn new(address: SocketAddr, serial: Serial) -> Self {
        Self {
            address,
            serial,
            label: String::new(),
            product_id: 0,
            firmware_version: String::new(),
            device_type: DeviceType::default(),
            light_type: LightType::default(),
            location: String::new(),
            group: String::new(),
            color: Color::default(),
            powered_on: false,
        }
    }

    /// Label if the device reported one, serial otherwise.
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            self.serial.to_string()
        } else {
            self.label.clone()
        }
    }
}

/// Orders devices by label, then by serial for devices sharing a label.
pub fn sort_devices(devices: &mut [Device]) {
    devices.sort_by(|a, b| {
        a.label
            .cmp(&b.label)
            .then_with(|| a.serial.to_string().cmp(&b.serial.to_string()))
    });
}
