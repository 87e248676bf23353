use crate::decode::Union;
use crate::error::GenerationError;
use crate::generate::fixups::strip_reserved;
use crate::generate::naming::{snake_ident, type_ident};
use crate::generate::resolve::TypeResolver;

pub const TEMPLATE: &str = "templates/unions";

pub fn render(
    out: &mut String,
    unions: &[Union],
    resolver: &TypeResolver,
) -> Result<(), GenerationError> {
    out.push_str("use super::wire::{Buf, BufMut, Wire, WireError};\n\n");

    for union in unions {
        render_union(out, union, resolver)?;
    }
    Ok(())
}

fn render_union(
    out: &mut String,
    union: &Union,
    resolver: &TypeResolver,
) -> Result<(), GenerationError> {
    let ident = type_ident(&union.name);
    let fields = strip_reserved(&union.fields);
    let widest = fields.iter().map(|f| f.size_bytes).max().unwrap_or(0);
    let size = union.size_bytes.max(widest);

    let mut interpretations: Vec<(String, String)> = Vec::with_capacity(fields.len());
    for field in &fields {
        if field.name.trim().is_empty() {
            return Err(GenerationError::render(
                TEMPLATE,
                format!("{}: interpretation of type {} has no name", union.name, field.ty),
            ));
        }
        let suffix = snake_ident(&field.name).trim_start_matches("r#").to_string();
        let ty = resolver.rust_type(&field.ty).map_err(|e| {
            GenerationError::render(TEMPLATE, format!("{}.{}: {e}", union.name, field.name))
        })?;
        interpretations.push((suffix, ty));
    }

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    out.push_str(&format!(
        "/// `{}` ({size} bytes), read as one of: {}.\n",
        union.name,
        if names.is_empty() { "raw bytes".to_string() } else { names.join(", ") }
    ));
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
    out.push_str(&format!("pub struct {ident} {{\nbytes: [u8; {size}],\n}}\n\n"));

    out.push_str(&format!("impl {ident} {{\n"));
    out.push_str(&format!(
        "pub fn from_bytes(bytes: [u8; {size}]) -> Self {{\nSelf {{ bytes }}\n}}\n\n\
         pub fn as_bytes(&self) -> &[u8; {size}] {{\n&self.bytes\n}}\n\n"
    ));
    for (suffix, ty) in &interpretations {
        out.push_str(&format!(
            "pub fn as_{suffix}(&self) -> Result<{ty}, WireError> {{\n\
             let mut buf: &[u8] = &self.bytes;\n\
             Wire::decode(&mut buf)\n\
             }}\n\n"
        ));
        out.push_str(&format!(
            "pub fn from_{suffix}(value: &{ty}) -> Self {{\n\
             let mut encoded: Vec<u8> = Vec::with_capacity({size});\n\
             value.encode(&mut encoded);\n\
             let mut bytes = [0u8; {size}];\n\
             let len = encoded.len().min(bytes.len());\n\
             bytes[..len].copy_from_slice(&encoded[..len]);\n\
             Self {{ bytes }}\n\
             }}\n\n"
        ));
    }
    out.push_str("}\n\n");

    out.push_str(&format!(
        "impl Default for {ident} {{\nfn default() -> Self {{\n<Self as Wire>::zeroed()\n}}\n}}\n\n"
    ));
    out.push_str(&format!(
        "impl Wire for {ident} {{\n\
         const SIZE: usize = {size};\n\n\
         fn zeroed() -> Self {{\nSelf {{ bytes: [0u8; {size}] }}\n}}\n\n\
         fn encode<B: BufMut>(&self, buf: &mut B) {{\nbuf.put_slice(&self.bytes);\n}}\n\n\
         fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {{\nOk(Self {{ bytes: Wire::decode(buf)? }})\n}}\n\
         }}\n\n"
    ));
    Ok(())
}
