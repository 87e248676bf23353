use super::string_literal;
use crate::decode::Enum;
use crate::error::GenerationError;
use crate::generate::naming::{type_ident, value_const_ident, value_label};
use crate::generate::notation::Primitive;

pub const TEMPLATE: &str = "templates/enums";

pub fn render(out: &mut String, enums: &[Enum]) -> Result<(), GenerationError> {
    out.push_str("use std::fmt;\n\n");
    out.push_str("use super::wire::{Buf, BufMut, Wire, WireError};\n\n");

    for definition in enums {
        render_enum(out, definition)?;
    }
    Ok(())
}

fn render_enum(out: &mut String, definition: &Enum) -> Result<(), GenerationError> {
    let ident = type_ident(&definition.name);
    let repr = Primitive::from_notation(&definition.ty)
        .filter(|p| !matches!(p, Primitive::F32 | Primitive::F64 | Primitive::Bool))
        .ok_or_else(|| {
            GenerationError::render(
                TEMPLATE,
                format!("enum {}: unsupported type {:?}", definition.name, definition.ty),
            )
        })?;
    let repr_name = repr.rust_name();

    let mut constants: Vec<(String, i64, &str, String)> = Vec::with_capacity(definition.values.len());
    for value in &definition.values {
        if !repr.holds(value.value) {
            return Err(GenerationError::render(
                TEMPLATE,
                format!(
                    "enum {}: value {} = {} does not fit {}",
                    definition.name, value.name, value.value, definition.ty
                ),
            ));
        }
        let mut constant = value_const_ident(&definition.name, &value.name);
        if constants.iter().any(|(existing, ..)| *existing == constant) {
            constant = format!("{constant}_{}", value.value);
        }
        let label = value_label(&definition.name, &value.name);
        constants.push((constant, value.value, value.name.as_str(), label));
    }

    out.push_str(&format!(
        "/// `{}` ({}). Values outside the table are kept as-is.\n",
        definition.name, definition.ty
    ));
    out.push_str("#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
    out.push_str(&format!("pub struct {ident}(pub {repr_name});\n\n"));

    out.push_str(&format!("impl {ident} {{\n"));
    for (constant, value, _, _) in &constants {
        out.push_str(&format!("pub const {constant}: Self = Self({value});\n"));
    }
    out.push_str("\n/// Every named value with its protocol name and display label.\n");
    out.push_str("pub const VALUES: &'static [(Self, &'static str, &'static str)] = &[\n");
    for (constant, _, name, label) in &constants {
        out.push_str(&format!(
            "(Self::{constant}, {}, {}),\n",
            string_literal(name),
            string_literal(label)
        ));
    }
    out.push_str("];\n\n");

    out.push_str(
        "pub fn name(self) -> Option<&'static str> {\n\
         Self::VALUES.iter().find(|(value, _, _)| *value == self).map(|(_, name, _)| *name)\n\
         }\n\n",
    );
    out.push_str(
        "pub fn label(self) -> Option<&'static str> {\n\
         Self::VALUES.iter().find(|(value, _, _)| *value == self).map(|(_, _, label)| *label)\n\
         }\n\n",
    );
    out.push_str(
        "pub fn from_name(name: &str) -> Option<Self> {\n\
         Self::VALUES.iter().find(|(_, known, _)| *known == name).map(|(value, _, _)| *value)\n\
         }\n\n",
    );
    out.push_str("/// Case-insensitive match on the label or the protocol name.\n");
    out.push_str(
        "pub fn from_label(label: &str) -> Option<Self> {\n\
         Self::VALUES\n\
         .iter()\n\
         .find(|(_, name, known)| known.eq_ignore_ascii_case(label) || name.eq_ignore_ascii_case(label))\n\
         .map(|(value, _, _)| *value)\n\
         }\n\n",
    );
    out.push_str("pub fn is_known(self) -> bool {\nself.name().is_some()\n}\n");
    out.push_str("}\n\n");

    out.push_str(&format!(
        "impl fmt::Display for {ident} {{\n\
         fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{\n\
         match self.label() {{\n\
         Some(label) => f.write_str(label),\n\
         None => write!(f, \"{{}}\", self.0),\n\
         }}\n}}\n}}\n\n"
    ));

    out.push_str(&format!(
        "impl From<{repr_name}> for {ident} {{\nfn from(value: {repr_name}) -> Self {{\nSelf(value)\n}}\n}}\n\n"
    ));
    out.push_str(&format!(
        "impl From<{ident}> for {repr_name} {{\nfn from(value: {ident}) -> Self {{\nvalue.0\n}}\n}}\n\n"
    ));

    out.push_str(&format!(
        "impl Wire for {ident} {{\n\
         const SIZE: usize = <{repr_name} as Wire>::SIZE;\n\n\
         fn zeroed() -> Self {{\nSelf(0)\n}}\n\n\
         fn encode<B: BufMut>(&self, buf: &mut B) {{\nself.0.encode(buf);\n}}\n\n\
         fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {{\nOk(Self(Wire::decode(buf)?))\n}}\n\
         }}\n\n"
    ));

    Ok(())
}
