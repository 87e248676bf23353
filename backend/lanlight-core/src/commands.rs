//! Ready-made outbound messages.
//!
//! Targets and sequence numbers are left unset; a [`DeviceSession`] stamps
//! them on the way out.
//!
//! [`DeviceSession`]: crate::session::DeviceSession

use crate::protocol::Message;
use crate::protocol::enums::LightWaveform;
use crate::protocol::fields::LightHsbk;
use crate::protocol::packets::{
    DeviceGetHostFirmware, DeviceGetLabel, DeviceGetService, DeviceGetVersion, DeviceSetLabel,
    DeviceSetPower, LightGet, LightSetWaveformOptional,
};
use crate::protocol::wire::label_to_bytes;

use models::device::color::scale_to_raw;

use std::time::Duration;

/// Shortest transition a color change is given.
pub const MIN_TRANSITION: Duration = Duration::from_secs(1);

pub const POWER_ON_LEVEL: u16 = u16::MAX;
pub const POWER_OFF_LEVEL: u16 = 0;

pub fn get_service() -> Message {
    Message::new(DeviceGetService::default())
}

pub fn set_power_on() -> Message {
    Message::new(DeviceSetPower {
        level: POWER_ON_LEVEL,
    })
}

pub fn set_power_off() -> Message {
    Message::new(DeviceSetPower {
        level: POWER_OFF_LEVEL,
    })
}

/// Labels longer than the 32-byte field are cut at a character boundary.
pub fn set_label(label: &str) -> Message {
    Message::new(DeviceSetLabel {
        label: label_to_bytes(label),
    })
}

/// Changes any subset of the color components.
///
/// Hue is in degrees (0-360), saturation and brightness in percent (0-100).
/// Components left as `None` are not touched on the device. The transition is
/// one saw cycle lasting `duration`, never shorter than [`MIN_TRANSITION`].
pub fn set_color(
    hue: Option<f64>,
    saturation: Option<f64>,
    brightness: Option<f64>,
    kelvin: Option<u16>,
    duration: Duration,
) -> Message {
    let period = u32::try_from(duration.max(MIN_TRANSITION).as_millis()).unwrap_or(u32::MAX);

    Message::new(LightSetWaveformOptional {
        transient: false,
        color: LightHsbk {
            hue: hue.map_or(0, |h| scale_to_raw(h, 360.0)),
            saturation: saturation.map_or(0, |s| scale_to_raw(s, 100.0)),
            brightness: brightness.map_or(0, |b| scale_to_raw(b, 100.0)),
            kelvin: kelvin.unwrap_or(0),
        },
        period,
        cycles: 1.0,
        skew_ratio: 0,
        waveform: LightWaveform::SAW,
        set_hue: hue.is_some(),
        set_saturation: saturation.is_some(),
        set_brightness: brightness.is_some(),
        set_kelvin: kelvin.is_some(),
        ..Default::default()
    })
}

/// Requests sent when a session starts.
pub fn device_state_messages() -> Vec<Message> {
    vec![
        Message::new(DeviceGetVersion::default()),
        Message::new(DeviceGetLabel::default()),
        Message::new(LightGet::default()),
        Message::new(DeviceGetHostFirmware::default()),
    ]
}

/// Requests re-sent every refresh period.
pub fn refresh_messages() -> Vec<Message> {
    vec![
        Message::new(DeviceGetVersion::default()),
        Message::new(DeviceGetLabel::default()),
        Message::new(LightGet::default()),
    ]
}
