//! Code generator: protocol IR in, Rust source tree out.
//!
//! Every artifact goes through the same pipeline: filter the IR, render the
//! template, format the source, write it. Nothing unformatted is written and
//! the first failure aborts the run.
//!
//! Output layout under the root:
//!
//! ```text
//! enums.rs  fields.rs  unions.rs  payloads.rs
//! packets/helpers.rs  packets/<namespace>.rs ...
//! ```
//!
//! The generated files expect to be mounted as sibling modules named after
//! their files, next to a hand-written `wire` module that provides `Wire`,
//! `Packet`, `WireError`, `Buf` and `BufMut`.

pub mod fixups;
pub mod naming;
pub mod notation;
pub mod resolve;
pub mod templates;

use crate::decode::ProtocolSpec;
use crate::error::GenerationError;
use resolve::TypeResolver;

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

pub const ENUMS_FILE: &str = "enums.rs";
pub const FIELDS_FILE: &str = "fields.rs";
pub const UNIONS_FILE: &str = "unions.rs";
pub const PAYLOADS_FILE: &str = "payloads.rs";
pub const PACKETS_DIR: &str = "packets";
pub const HELPERS_FILE: &str = "helpers.rs";

/// Generates the whole source tree for `spec` under `output_root`.
pub fn generate(spec: &ProtocolSpec, output_root: &Path) -> Result<(), GenerationError> {
    for mismatch in spec.size_mismatches() {
        warn!(
            "Size mismatch in {}: declared {} bytes, computed {}",
            mismatch.path, mismatch.declared, mismatch.computed
        );
    }

    let packets_dir = output_root.join(PACKETS_DIR);
    fs::create_dir_all(&packets_dir).map_err(|e| GenerationError::write(&packets_dir, e))?;

    let enums = fixups::usable_enums(&spec.enums);
    let dropped = spec.enums.len() - enums.len();
    if dropped > 0 {
        debug!("Omitting {dropped} enums without usable values");
    }
    let resolver = TypeResolver::new(spec, &enums);

    generate_from_template(
        templates::enums::TEMPLATE,
        &output_root.join(ENUMS_FILE),
        |out| templates::enums::render(out, &enums),
    )?;
    generate_from_template(
        templates::fields::TEMPLATE,
        &output_root.join(FIELDS_FILE),
        |out| templates::fields::render(out, &spec.fields, &resolver),
    )?;
    generate_from_template(
        templates::unions::TEMPLATE,
        &output_root.join(UNIONS_FILE),
        |out| templates::unions::render(out, &spec.unions, &resolver),
    )?;

    let sorted = fixups::sorted_by_type(&spec.packets);
    generate_from_template(
        templates::payloads::TEMPLATE,
        &output_root.join(PAYLOADS_FILE),
        |out| templates::payloads::render(out, &sorted),
    )?;

    let mut namespaces = Vec::new();
    for (namespace, packets) in fixups::by_namespace(&spec.packets) {
        let module = naming::snake_ident(namespace);
        let file = module.trim_start_matches("r#").to_string();
        generate_from_template(
            templates::namespace::TEMPLATE,
            &packets_dir.join(format!("{file}.rs")),
            |out| templates::namespace::render(out, namespace, &packets, &resolver),
        )?;
        namespaces.push((module, file));
    }
    generate_from_template(
        templates::helpers::TEMPLATE,
        &packets_dir.join(HELPERS_FILE),
        |out| templates::helpers::render(out, &namespaces),
    )?;

    info!(
        "Generated {} enums, {} field groups, {} unions, {} packets in {} namespaces into {}",
        enums.len(),
        spec.fields.len(),
        spec.unions.len(),
        spec.packets.len(),
        namespaces.len(),
        output_root.display()
    );
    Ok(())
}

/// Render, format and write one artifact.
pub fn generate_from_template<F>(
    template: &'static str,
    output_path: &Path,
    render: F,
) -> Result<(), GenerationError>
where
    F: FnOnce(&mut String) -> Result<(), GenerationError>,
{
    let mut source = String::new();
    render(&mut source)?;
    let formatted = format_source(template, &source)?;

    let mut contents = header(template);
    contents.push_str(&formatted);
    fs::write(output_path, contents).map_err(|e| GenerationError::write(output_path, e))?;

    debug!("Wrote {} from {template}", output_path.display());
    Ok(())
}

/// Parses `source` as a Rust file and pretty-prints it.
pub fn format_source(template: &'static str, source: &str) -> Result<String, GenerationError> {
    let file = syn::parse_file(source).map_err(|e| GenerationError::format(template, e))?;
    Ok(prettyplease::unparse(&file))
}

fn header(template: &str) -> String {
    format!("// Generated by lanlight-gen - DO NOT EDIT\n// Template: {template}\n\n")
}
