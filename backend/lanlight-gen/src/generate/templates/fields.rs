use super::render_struct;
use crate::decode::FieldGroup;
use crate::error::GenerationError;
use crate::generate::fixups::name_reserved;
use crate::generate::resolve::TypeResolver;

pub const TEMPLATE: &str = "templates/fields";

pub fn render(
    out: &mut String,
    groups: &[FieldGroup],
    resolver: &TypeResolver,
) -> Result<(), GenerationError> {
    out.push_str("use super::wire::{Buf, BufMut, Wire, WireError};\n\n");

    for group in groups {
        let fields = name_reserved(&group.fields);
        let doc = format!("`{}` ({} bytes).", group.name, group.size_bytes);
        render_struct(out, TEMPLATE, &group.name, &doc, &fields, resolver)?;
    }
    Ok(())
}
