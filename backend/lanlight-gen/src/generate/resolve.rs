use std::collections::HashMap;

use super::naming::type_ident;
use super::notation::{Primitive, TypeRef};
use crate::decode::{Enum, ProtocolSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedKind {
    Enum,
    /// Enum dropped for having no usable values; fields fall back to its
    /// underlying integer.
    OmittedEnum(Primitive),
    FieldGroup,
    Union,
}

/// Maps field type notation to Rust types as seen from any generated file.
///
/// Generated files sit next to each other (`packets` re-exports its parent's
/// modules), so every reference is `super::<module>::<Type>`.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    named: HashMap<String, NamedKind>,
}

impl TypeResolver {
    pub fn new(spec: &ProtocolSpec, usable_enums: &[Enum]) -> Self {
        let mut named = HashMap::new();
        for definition in &spec.enums {
            let kind = if usable_enums.iter().any(|e| e.name == definition.name) {
                NamedKind::Enum
            } else {
                NamedKind::OmittedEnum(
                    Primitive::from_notation(&definition.ty).unwrap_or(Primitive::U8),
                )
            };
            named.insert(definition.name.clone(), kind);
        }
        for group in &spec.fields {
            named.insert(group.name.clone(), NamedKind::FieldGroup);
        }
        for union in &spec.unions {
            named.insert(union.name.clone(), NamedKind::Union);
        }
        TypeResolver { named }
    }

    pub fn rust_type(&self, notation: &str) -> Result<String, String> {
        let parsed = TypeRef::parse(notation)?;
        self.render(&parsed)
    }

    fn render(&self, ty: &TypeRef) -> Result<String, String> {
        match ty {
            TypeRef::Primitive(primitive) => Ok(primitive.rust_name().to_string()),
            TypeRef::Named(name) => match self.named.get(name) {
                Some(NamedKind::Enum) => Ok(format!("super::enums::{}", type_ident(name))),
                Some(NamedKind::OmittedEnum(primitive)) => Ok(primitive.rust_name().to_string()),
                Some(NamedKind::FieldGroup) => Ok(format!("super::fields::{}", type_ident(name))),
                Some(NamedKind::Union) => Ok(format!("super::unions::{}", type_ident(name))),
                None => Err(format!("reference to undeclared type <{name}>")),
            },
            TypeRef::Array { len, element } => Ok(format!("[{}; {len}]", self.render(element)?)),
        }
    }
}
