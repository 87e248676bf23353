//! Identifier mapping from protocol names to Rust identifiers.

const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Splits a name into words on separators and case boundaries.
///
/// `LightSetHSBK` → `Light`, `Set`, `HSBK`; `multi_zone` → `multi`, `zone`;
/// `HSBKColor` → `HSBK`, `Color`. Digits stay attached to the word before them.
pub fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let lower_to_upper = (prev.is_lowercase() || prev.is_ascii_digit()) && c.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase());
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `LightHsbk`-style type name. Names that are already valid UpperCamel
/// identifiers are kept verbatim.
pub fn type_ident(name: &str) -> String {
    if is_identifier(name) && name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return escape(name.to_string());
    }

    let camel: String = words(name)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect();
    escape(leading_digit(camel))
}

/// snake_case field or module name.
pub fn snake_ident(name: &str) -> String {
    let snake = words(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    escape(leading_digit(snake))
}

/// SCREAMING_SNAKE_CASE constant name.
pub fn screaming_ident(name: &str) -> String {
    let screaming = words(name)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_");
    escape(leading_digit(screaming))
}

/// Constant name for an enum value, with the enum's own prefix removed when
/// the remainder is still a usable identifier.
///
/// `LIGHT_WAVEFORM_SAW` in `LightWaveform` → `SAW`; `DEVICE_SERVICE_UDP` in
/// `DeviceService` → `UDP`; `BUTTON_GESTURE_2` stays whole.
pub fn value_const_ident(enum_name: &str, value_name: &str) -> String {
    let full = screaming_ident(value_name);
    let prefix = format!("{}_", screaming_ident(enum_name));
    match full.strip_prefix(&prefix) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_alphabetic()) && is_identifier(rest) => {
            escape(rest.to_string())
        }
        _ => full,
    }
}

/// Human-readable label for an enum value: prefix removed, words title-cased.
///
/// `LIGHT_WAVEFORM_HALF_SINE` → `Half Sine`.
pub fn value_label(enum_name: &str, value_name: &str) -> String {
    let constant = value_const_ident(enum_name, value_name);
    constant
        .trim_start_matches("r#")
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn leading_digit(ident: String) -> String {
    if ident.starts_with(|c: char| c.is_ascii_digit()) || ident.is_empty() {
        format!("_{ident}")
    } else {
        ident
    }
}

fn escape(ident: String) -> String {
    if NON_RAW_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if STRICT_KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}
