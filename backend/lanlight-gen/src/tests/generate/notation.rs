use crate::generate::notation::{Primitive, TypeRef};

#[test]
fn given_primitive_notation_when_parse_then_primitive() {
    assert_eq!(TypeRef::parse("uint16"), Ok(TypeRef::Primitive(Primitive::U16)));
    assert_eq!(TypeRef::parse("byte"), Ok(TypeRef::Primitive(Primitive::U8)));
    assert_eq!(TypeRef::parse("float32"), Ok(TypeRef::Primitive(Primitive::F32)));
}

#[test]
fn given_reference_notation_when_parse_then_named() {
    assert_eq!(
        TypeRef::parse("<LightHsbk>"),
        Ok(TypeRef::Named("LightHsbk".to_string()))
    );
}

#[test]
fn given_nested_array_notation_when_parse_then_array_of_element() {
    let parsed = TypeRef::parse("[8]<LightHsbk>").unwrap();
    assert_eq!(
        parsed,
        TypeRef::Array {
            len: 8,
            element: Box::new(TypeRef::Named("LightHsbk".to_string())),
        }
    );
    assert_eq!(parsed.to_string(), "[8]<LightHsbk>");
}

#[test]
fn given_unknown_notation_when_parse_then_error() {
    assert!(TypeRef::parse("uint24").is_err());
    assert!(TypeRef::parse("[x]byte").is_err());
    assert!(TypeRef::parse("<>").is_err());
}

#[test]
fn given_enum_backing_type_when_holds_then_checks_range() {
    assert!(Primitive::U16.holds(65535));
    assert!(!Primitive::U8.holds(256));
    assert!(!Primitive::U32.holds(-1));
    assert!(Primitive::I8.holds(-128));
    assert!(!Primitive::F32.holds(0));
}
