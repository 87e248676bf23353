use crate::decode::Packet;
use crate::error::GenerationError;
use crate::generate::naming::type_ident;

pub const TEMPLATE: &str = "templates/payloads";

/// Reserved for payloads whose type code is not in the registry.
const UNKNOWN_VARIANT: &str = "Unknown";

/// `payloads.rs`: the `Payload` sum type and its registry, both in ascending
/// `pkt_type` order.
pub fn render(out: &mut String, packets: &[&Packet]) -> Result<(), GenerationError> {
    let variants: Vec<(String, u16)> = packets
        .iter()
        .map(|p| (type_ident(&p.name), p.pkt_type))
        .collect();
    if let Some((variant, _)) = variants.iter().find(|(v, _)| v == UNKNOWN_VARIANT) {
        return Err(GenerationError::render(
            TEMPLATE,
            format!("packet name {variant} collides with the catch-all payload"),
        ));
    }

    out.push_str("use super::packets;\n");
    out.push_str("use super::wire::{BufMut, Packet, Wire, WireError};\n\n");

    out.push_str("/// Decoded packet body, selected by type code.\n");
    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    out.push_str("pub enum Payload {\n");
    for (variant, _) in &variants {
        out.push_str(&format!("{variant}(packets::{variant}),\n"));
    }
    out.push_str("/// Type code with no registered packet; the body is kept verbatim.\n");
    out.push_str("Unknown { pkt_type: u16, bytes: Vec<u8> },\n");
    out.push_str("}\n\n");

    out.push_str("pub type Decoder = fn(&[u8]) -> Result<Payload, WireError>;\n\n");

    out.push_str("/// `(pkt_type, decoder)` pairs, sorted by type code.\n");
    out.push_str("pub static REGISTRY: &[(u16, Decoder)] = &[\n");
    for (variant, pkt_type) in &variants {
        out.push_str(&format!(
            "({pkt_type}, decode_packet::<packets::{variant}> as Decoder),\n"
        ));
    }
    out.push_str("];\n\n");

    out.push_str(
        "fn decode_packet<P>(bytes: &[u8]) -> Result<Payload, WireError>\n\
         where\n\
         P: Packet + Into<Payload>,\n\
         {\n\
         let mut buf = bytes;\n\
         Ok(P::decode(&mut buf)?.into())\n\
         }\n\n",
    );

    out.push_str(
        "/// Decoder registered for `pkt_type`.\n\
         pub fn lookup(pkt_type: u16) -> Option<Decoder> {\n\
         REGISTRY\n\
         .binary_search_by_key(&pkt_type, |(code, _)| *code)\n\
         .ok()\n\
         .map(|index| REGISTRY[index].1)\n\
         }\n\n",
    );

    out.push_str("impl Payload {\n");
    out.push_str(
        "/// Unregistered type codes decode to [`Payload::Unknown`].\n\
         pub fn decode(pkt_type: u16, bytes: &[u8]) -> Result<Self, WireError> {\n\
         match lookup(pkt_type) {\n\
         Some(decoder) => decoder(bytes),\n\
         None => Ok(Payload::Unknown { pkt_type, bytes: bytes.to_vec() }),\n\
         }\n\
         }\n\n",
    );

    render_match(out, "pub fn pkt_type(&self) -> u16", &variants, |variant| {
        format!("Payload::{variant}(_) => <packets::{variant} as Packet>::PKT_TYPE,\n")
    }, "Payload::Unknown { pkt_type, .. } => *pkt_type,\n");

    render_match(out, "pub fn name(&self) -> &'static str", &variants, |variant| {
        format!("Payload::{variant}(_) => <packets::{variant} as Packet>::NAME,\n")
    }, "Payload::Unknown { .. } => \"Unknown\",\n");

    render_match(out, "pub fn encoded_len(&self) -> usize", &variants, |variant| {
        format!("Payload::{variant}(_) => <packets::{variant} as Wire>::SIZE,\n")
    }, "Payload::Unknown { bytes, .. } => bytes.len(),\n");

    render_match(out, "pub fn encode<B: BufMut>(&self, buf: &mut B)", &variants, |variant| {
        format!("Payload::{variant}(packet) => packet.encode(buf),\n")
    }, "Payload::Unknown { bytes, .. } => buf.put_slice(bytes),\n");
    out.push_str("}\n\n");

    for (variant, _) in &variants {
        out.push_str(&format!(
            "impl From<packets::{variant}> for Payload {{\n\
             fn from(packet: packets::{variant}) -> Self {{\nPayload::{variant}(packet)\n}}\n}}\n\n"
        ));
    }
    Ok(())
}

fn render_match<F>(out: &mut String, signature: &str, variants: &[(String, u16)], arm: F, fallback: &str)
where
    F: Fn(&str) -> String,
{
    out.push_str(&format!("{signature} {{\nmatch self {{\n"));
    for (variant, _) in variants {
        out.push_str(&arm(variant));
    }
    out.push_str(fallback);
    out.push_str("}\n}\n\n");
}
