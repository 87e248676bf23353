use crate::generate::naming::{
    screaming_ident, snake_ident, type_ident, value_const_ident, value_label, words,
};

#[test]
fn given_mixed_case_names_when_words_then_splits_on_case_and_separators() {
    assert_eq!(words("LightSetHSBK"), ["Light", "Set", "HSBK"]);
    assert_eq!(words("HSBKColor"), ["HSBK", "Color"]);
    assert_eq!(words("multi_zone"), ["multi", "zone"]);
    assert_eq!(words("first value"), ["first", "value"]);
    assert_eq!(words("Reserved1"), ["Reserved1"]);
}

/// **VALUE**: Field names become snake_case and keywords stay usable.
///
/// **BUG THIS CATCHES**: A field called `Type` would otherwise generate
/// `pub type: u8`, which does not parse, and the formatting step would fail
/// the whole run.
#[test]
fn given_protocol_field_names_when_snake_ident_then_valid_rust_fields() {
    assert_eq!(snake_ident("VersionMajor"), "version_major");
    assert_eq!(snake_ident("Reserved3"), "reserved3");
    assert_eq!(snake_ident("Type"), "r#type");
    assert_eq!(snake_ident("self"), "self_");
    assert_eq!(snake_ident("2ndValue"), "_2nd_value");
}

#[test]
fn given_type_names_when_type_ident_then_upper_camel() {
    assert_eq!(type_ident("LightHsbk"), "LightHsbk");
    assert_eq!(type_ident("light_hsbk"), "LightHsbk");
    assert_eq!(type_ident("Self"), "Self_");
}

#[test]
fn given_name_when_screaming_ident_then_upper_snake() {
    assert_eq!(screaming_ident("first value"), "FIRST_VALUE");
    assert_eq!(screaming_ident("LightWaveform"), "LIGHT_WAVEFORM");
}

/// **VALUE**: Enum constants drop the enum's own prefix only when the rest is
/// still an identifier.
#[test]
fn given_prefixed_values_when_value_const_ident_then_prefix_is_stripped() {
    assert_eq!(value_const_ident("LightWaveform", "LIGHT_WAVEFORM_SAW"), "SAW");
    assert_eq!(value_const_ident("DeviceService", "DEVICE_SERVICE_UDP"), "UDP");
    assert_eq!(
        value_const_ident("ButtonGesture", "BUTTON_GESTURE_2"),
        "BUTTON_GESTURE_2"
    );
    assert_eq!(value_const_ident("TestEnum", "first value"), "FIRST_VALUE");
}

#[test]
fn given_value_name_when_value_label_then_title_case_words() {
    assert_eq!(value_label("LightWaveform", "LIGHT_WAVEFORM_HALF_SINE"), "Half Sine");
    assert_eq!(value_label("PowerLevel", "STANDBY"), "Standby");
}
