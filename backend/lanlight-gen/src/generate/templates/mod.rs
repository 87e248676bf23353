//! Source templates, one per generated artifact.
//!
//! Each template renders plain Rust source into a `String`; layout is left to
//! the formatting step that runs afterwards.

pub mod enums;
pub mod fields;
pub mod helpers;
pub mod namespace;
pub mod payloads;
pub mod unions;

use super::naming::{snake_ident, type_ident};
use super::resolve::TypeResolver;
use crate::decode::Field;
use crate::error::GenerationError;

/// Struct with the wire codec, shared by field groups and packets.
pub(crate) fn render_struct(
    out: &mut String,
    template: &'static str,
    name: &str,
    doc: &str,
    fields: &[Field],
    resolver: &TypeResolver,
) -> Result<(), GenerationError> {
    let ident = type_ident(name);
    let mut members: Vec<(String, String)> = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(GenerationError::render(
                template,
                format!("{name}: field #{} has no name", index + 1),
            ));
        }
        let member = snake_ident(&field.name);
        if members.iter().any(|(existing, _)| *existing == member) {
            return Err(GenerationError::render(
                template,
                format!("{name}: more than one field maps to `{member}`"),
            ));
        }
        let ty = resolver
            .rust_type(&field.ty)
            .map_err(|e| GenerationError::render(template, format!("{name}.{}: {e}", field.name)))?;
        members.push((member, ty));
    }

    out.push_str(&format!("/// {doc}\n"));
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq)]\n");
    out.push_str(&format!("pub struct {ident} {{\n"));
    for (member, ty) in &members {
        out.push_str(&format!("pub {member}: {ty},\n"));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        "impl Default for {ident} {{\nfn default() -> Self {{\n<Self as Wire>::zeroed()\n}}\n}}\n\n"
    ));

    let size = if members.is_empty() {
        "0".to_string()
    } else {
        members
            .iter()
            .map(|(_, ty)| format!("<{ty} as Wire>::SIZE"))
            .collect::<Vec<_>>()
            .join(" + ")
    };
    let buf = if members.is_empty() { "_buf" } else { "buf" };

    out.push_str(&format!("impl Wire for {ident} {{\n"));
    out.push_str(&format!("const SIZE: usize = {size};\n\n"));

    out.push_str("fn zeroed() -> Self {\nSelf {\n");
    for (member, _) in &members {
        out.push_str(&format!("{member}: Wire::zeroed(),\n"));
    }
    out.push_str("}\n}\n\n");

    out.push_str(&format!("fn encode<B: BufMut>(&self, {buf}: &mut B) {{\n"));
    for (member, _) in &members {
        out.push_str(&format!("self.{member}.encode(buf);\n"));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        "fn decode<B: Buf>({buf}: &mut B) -> Result<Self, WireError> {{\nOk(Self {{\n"
    ));
    for (member, _) in &members {
        out.push_str(&format!("{member}: Wire::decode(buf)?,\n"));
    }
    out.push_str("})\n}\n}\n\n");

    Ok(())
}

/// Rust string literal for `value`.
pub(crate) fn string_literal(value: &str) -> String {
    format!("{value:?}")
}
