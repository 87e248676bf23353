use super::render_struct;
use crate::decode::Packet;
use crate::error::GenerationError;
use crate::generate::fixups::name_reserved;
use crate::generate::naming::type_ident;
use crate::generate::resolve::TypeResolver;

pub const TEMPLATE: &str = "templates/namespace";

/// One `packets/<namespace>.rs` file, packets in document order.
pub fn render(
    out: &mut String,
    namespace: &str,
    packets: &[&Packet],
    resolver: &TypeResolver,
) -> Result<(), GenerationError> {
    out.push_str("use super::wire::{Buf, BufMut, Packet, Wire, WireError};\n\n");

    for packet in packets {
        let fields = name_reserved(&packet.fields);
        let doc = format!(
            "`{namespace}.{}`: type {}, {} bytes.",
            packet.name, packet.pkt_type, packet.size_bytes
        );
        render_struct(out, TEMPLATE, &packet.name, &doc, &fields, resolver)?;

        out.push_str(&format!(
            "impl Packet for {} {{\nconst PKT_TYPE: u16 = {};\nconst NAME: &'static str = {:?};\n}}\n\n",
            type_ident(&packet.name),
            packet.pkt_type,
            packet.name
        ));
    }
    Ok(())
}
