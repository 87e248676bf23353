use serde::Serialize;

/// Device color in presentation units.
///
/// Hue is in degrees (0-360), saturation and brightness are percentages
/// (0-100), kelvin is passed through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Color {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub kelvin: u16,
}

impl Color {
    /// Converts the 16-bit HSBK components a device reports.
    pub fn from_raw(hue: u16, saturation: u16, brightness: u16, kelvin: u16) -> Self {
        Self {
            hue: raw_to_scale(hue, 360.0),
            saturation: raw_to_scale(saturation, 100.0),
            brightness: raw_to_scale(brightness, 100.0),
            kelvin,
        }
    }

    /// True for whites, where kelvin rather than hue describes the color.
    pub fn is_white(&self) -> bool {
        self.saturation == 0.0
    }
}

pub fn raw_to_scale(value: u16, scale: f64) -> f64 {
    (f64::from(value) * scale / f64::from(u16::MAX)).round()
}

/// Inverse of [`raw_to_scale`]; out-of-range input is clamped.
pub fn scale_to_raw(value: f64, scale: f64) -> u16 {
    let clamped = value.clamp(0.0, scale);
    (clamped * f64::from(u16::MAX) / scale).round() as u16
}
