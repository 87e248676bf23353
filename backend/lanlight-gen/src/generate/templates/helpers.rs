use crate::error::GenerationError;

pub const TEMPLATE: &str = "templates/helpers";

/// `packets/helpers.rs`: makes the sibling modules visible to every
/// namespace, mounts each namespace file and re-exports its packets.
///
/// `namespaces` pairs the module identifier with its file stem.
pub fn render(out: &mut String, namespaces: &[(String, String)]) -> Result<(), GenerationError> {
    out.push_str("use super::{enums, fields, unions, wire};\n\n");

    for (module, file) in namespaces {
        out.push_str(&format!("pub mod {module} {{\ninclude!(\"{file}.rs\");\n}}\n"));
    }
    out.push('\n');
    for (module, _) in namespaces {
        out.push_str(&format!("pub use self::{module}::*;\n"));
    }

    out.push_str("\n/// Packet namespaces in declaration order.\n");
    out.push_str("pub const NAMESPACES: &[&str] = &[");
    let names: Vec<String> = namespaces.iter().map(|(_, file)| format!("{file:?}")).collect();
    out.push_str(&names.join(", "));
    out.push_str("];\n");
    Ok(())
}
