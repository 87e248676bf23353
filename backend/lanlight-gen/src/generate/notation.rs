//! Field type notation: `uint16`, `<LightHsbk>`, `[32]byte`, `[8]<LightHsbk>`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(\d+)\](.+)$").expect("valid regex"));
static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([A-Za-z_][A-Za-z0-9_]*)>$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
}

impl Primitive {
    pub fn from_notation(notation: &str) -> Option<Self> {
        let primitive = match notation {
            "uint8" | "byte" => Primitive::U8,
            "uint16" => Primitive::U16,
            "uint32" => Primitive::U32,
            "uint64" => Primitive::U64,
            "int8" => Primitive::I8,
            "int16" => Primitive::I16,
            "int32" => Primitive::I32,
            "int64" => Primitive::I64,
            "float32" => Primitive::F32,
            "float64" => Primitive::F64,
            "bool" => Primitive::Bool,
            _ => return None,
        };
        Some(primitive)
    }

    pub fn rust_name(self) -> &'static str {
        match self {
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::Bool => "bool",
        }
    }

    pub fn width(self) -> usize {
        match self {
            Primitive::U8 | Primitive::I8 | Primitive::Bool => 1,
            Primitive::U16 | Primitive::I16 => 2,
            Primitive::U32 | Primitive::I32 | Primitive::F32 => 4,
            Primitive::U64 | Primitive::I64 | Primitive::F64 => 8,
        }
    }

    /// Whether `value` fits this type. Only integer types can back an enum.
    pub fn holds(self, value: i64) -> bool {
        match self {
            Primitive::U8 => u8::try_from(value).is_ok(),
            Primitive::U16 => u16::try_from(value).is_ok(),
            Primitive::U32 => u32::try_from(value).is_ok(),
            Primitive::U64 => value >= 0,
            Primitive::I8 => i8::try_from(value).is_ok(),
            Primitive::I16 => i16::try_from(value).is_ok(),
            Primitive::I32 => i32::try_from(value).is_ok(),
            Primitive::I64 => true,
            Primitive::F32 | Primitive::F64 | Primitive::Bool => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(Primitive),
    Named(String),
    Array { len: usize, element: Box<TypeRef> },
}

impl TypeRef {
    pub fn parse(notation: &str) -> Result<TypeRef, String> {
        let notation = notation.trim();
        if let Some(primitive) = Primitive::from_notation(notation) {
            return Ok(TypeRef::Primitive(primitive));
        }
        if let Some(captures) = REFERENCE.captures(notation) {
            return Ok(TypeRef::Named(captures[1].to_string()));
        }
        if let Some(captures) = ARRAY.captures(notation) {
            let len: usize = captures[1]
                .parse()
                .map_err(|e| format!("invalid array length in {notation:?}: {e}"))?;
            let element = TypeRef::parse(&captures[2])?;
            return Ok(TypeRef::Array {
                len,
                element: Box::new(element),
            });
        }
        Err(format!("unknown type notation {notation:?}"))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p.rust_name()),
            TypeRef::Named(name) => write!(f, "<{name}>"),
            TypeRef::Array { len, element } => write!(f, "[{len}]{element}"),
        }
    }
}
