//! Intermediate representation of a protocol document.
//!
//! Entry names are the mapping keys of the document, injected after
//! deserialization; they never appear inside the entries themselves.

use crate::generate::notation::{Primitive, TypeRef};

use serde::Deserialize;

/// Type notation of a placeholder field.
pub const RESERVED: &str = "reserved";

/// Decoded protocol document. Collections keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolSpec {
    pub enums: Vec<Enum>,
    pub fields: Vec<FieldGroup>,
    pub unions: Vec<Union>,
    pub packets: Vec<Packet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Enum {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

impl EnumValue {
    pub fn is_reserved(&self) -> bool {
        self.name.eq_ignore_ascii_case(RESERVED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub size_bytes: usize,
}

impl Field {
    /// Placeholder fields carry no name and the `reserved` type.
    pub fn is_reserved(&self) -> bool {
        self.ty.eq_ignore_ascii_case(RESERVED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldGroup {
    #[serde(skip)]
    pub name: String,
    pub size_bytes: usize,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Alternative interpretations of the same `size_bytes` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Union {
    #[serde(skip)]
    pub name: String,
    pub size_bytes: usize,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Packet {
    #[serde(skip)]
    pub name: String,
    #[serde(skip)]
    pub namespace: String,
    pub pkt_type: u16,
    pub size_bytes: usize,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A declared size that disagrees with what its contents add up to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeMismatch {
    /// `fields.Name`, `unions.Name` or `packets.namespace.Name` for a
    /// container, with `.Field` appended for a single field.
    pub path: String,
    pub declared: usize,
    pub computed: usize,
}

impl ProtocolSpec {
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
            && self.fields.is_empty()
            && self.unions.is_empty()
            && self.packets.is_empty()
    }

    pub fn packet(&self, name: &str) -> Option<&Packet> {
        self.packets.iter().find(|p| p.name == name)
    }

    /// Declared vs computed sizes for every container and field that
    /// disagrees.
    ///
    /// Field groups and packets are the sum of their fields; a union is as
    /// wide as its widest interpretation. A field is as wide as its type:
    /// primitives by their encoding, arrays by length times element, enums
    /// by their backing type and named groups or unions by their own
    /// declared size. Reserved fields and unresolvable types are only
    /// counted through their container.
    pub fn size_mismatches(&self) -> Vec<SizeMismatch> {
        let groups = self.fields.iter().map(|g| {
            (
                format!("fields.{}", g.name),
                g.size_bytes,
                sum_sizes(&g.fields),
            )
        });
        let unions = self.unions.iter().map(|u| {
            let widest = u.fields.iter().map(|f| f.size_bytes).max().unwrap_or(0);
            (format!("unions.{}", u.name), u.size_bytes, widest)
        });
        let packets = self.packets.iter().map(|p| {
            (
                format!("packets.{}.{}", p.namespace, p.name),
                p.size_bytes,
                sum_sizes(&p.fields),
            )
        });

        let containers = self
            .fields
            .iter()
            .map(|g| (format!("fields.{}", g.name), &g.fields))
            .chain(
                self.unions
                    .iter()
                    .map(|u| (format!("unions.{}", u.name), &u.fields)),
            )
            .chain(
                self.packets
                    .iter()
                    .map(|p| (format!("packets.{}.{}", p.namespace, p.name), &p.fields)),
            );
        let fields = containers.flat_map(|(container, fields)| {
            fields
                .iter()
                .enumerate()
                .filter(|(_, f)| !f.is_reserved())
                .filter_map(move |(index, f)| {
                    let width = self.type_width(&f.ty)?;
                    let field = if f.name.is_empty() {
                        index.to_string()
                    } else {
                        f.name.clone()
                    };
                    Some((format!("{container}.{field}"), f.size_bytes, width))
                })
        });

        groups
            .chain(unions)
            .chain(packets)
            .chain(fields)
            .filter(|(_, declared, computed)| declared != computed)
            .map(|(path, declared, computed)| SizeMismatch {
                path,
                declared,
                computed,
            })
            .collect()
    }

    /// Encoded width of a field type, when the document defines it.
    pub fn type_width(&self, notation: &str) -> Option<usize> {
        let parsed = TypeRef::parse(notation).ok()?;
        self.width_of(&parsed)
    }

    fn width_of(&self, ty: &TypeRef) -> Option<usize> {
        match ty {
            TypeRef::Primitive(primitive) => Some(primitive.width()),
            TypeRef::Array { len, element } => self.width_of(element).map(|w| w * len),
            TypeRef::Named(name) => {
                if let Some(definition) = self.enums.iter().find(|e| &e.name == name) {
                    return Primitive::from_notation(&definition.ty).map(Primitive::width);
                }
                if let Some(group) = self.fields.iter().find(|g| &g.name == name) {
                    return Some(group.size_bytes);
                }
                self.unions
                    .iter()
                    .find(|u| &u.name == name)
                    .map(|u| u.size_bytes)
            }
        }
    }
}

fn sum_sizes(fields: &[Field]) -> usize {
    fields.iter().map(|f| f.size_bytes).sum()
}

/// Entries decoded from a `name -> definition` mapping.
pub(crate) trait Named {
    fn set_name(&mut self, name: String);
}

impl Named for Enum {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for FieldGroup {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for Union {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for Packet {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
