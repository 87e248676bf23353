use crate::Color;
use crate::device::color::scale_to_raw;

#[test]
fn given_raw_extremes_when_converted_then_maps_to_full_scale() {
    let color = Color::from_raw(u16::MAX, u16::MAX, 0, 3500);

    assert_eq!(color.hue, 360.0);
    assert_eq!(color.saturation, 100.0);
    assert_eq!(color.brightness, 0.0);
    assert_eq!(color.kelvin, 3500);
}

#[test]
fn given_midpoint_when_converted_then_rounds_to_nearest_unit() {
    // 32768 / 65535 * 100 = 50.0008
    let color = Color::from_raw(0, 32768, 32768, 2700);

    assert_eq!(color.saturation, 50.0);
    assert_eq!(color.brightness, 50.0);
    assert!(!color.is_white());
}

/// **BUG THIS CATCHES**: A brightness of 120% typed on the command line must
/// clamp to full power rather than wrapping around to a dim value.
#[test]
fn given_out_of_range_value_when_scaled_to_raw_then_clamps() {
    assert_eq!(scale_to_raw(120.0, 100.0), u16::MAX);
    assert_eq!(scale_to_raw(-5.0, 360.0), 0);
    assert_eq!(scale_to_raw(100.0, 100.0), u16::MAX);
}
