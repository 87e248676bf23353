//! Filters applied to the IR before rendering.

use crate::decode::{Enum, Field, Packet};

/// Primitive notation for a placeholder of `width` bytes.
pub fn reserved_type(width: usize) -> String {
    match width {
        1 => "uint8".to_string(),
        2 => "uint16".to_string(),
        4 => "uint32".to_string(),
        8 => "uint64".to_string(),
        n => format!("[{n}]byte"),
    }
}

/// Names placeholder fields `Reserved1..ReservedK` in order and gives them a
/// concrete type by width. Numbering restarts for every container.
pub fn name_reserved(fields: &[Field]) -> Vec<Field> {
    let mut counter = 0;
    fields
        .iter()
        .map(|field| {
            if !field.is_reserved() {
                return field.clone();
            }
            counter += 1;
            Field {
                name: format!("Reserved{counter}"),
                ty: reserved_type(field.size_bytes),
                size_bytes: field.size_bytes,
            }
        })
        .collect()
}

/// Drops placeholder fields. Union interpretations never include padding.
pub fn strip_reserved(fields: &[Field]) -> Vec<Field> {
    fields.iter().filter(|f| !f.is_reserved()).cloned().collect()
}

/// Removes "reserved" values, then enums left without any value.
pub fn usable_enums(enums: &[Enum]) -> Vec<Enum> {
    enums
        .iter()
        .map(|definition| Enum {
            name: definition.name.clone(),
            ty: definition.ty.clone(),
            values: definition
                .values
                .iter()
                .filter(|v| !v.is_reserved())
                .cloned()
                .collect(),
        })
        .filter(|definition| !definition.values.is_empty())
        .collect()
}

/// Packets in ascending `pkt_type` order.
pub fn sorted_by_type(packets: &[Packet]) -> Vec<&Packet> {
    let mut sorted: Vec<&Packet> = packets.iter().collect();
    sorted.sort_by_key(|p| p.pkt_type);
    sorted
}

/// Packets grouped by namespace; namespaces in first-seen order, packets in
/// document order within each namespace.
pub fn by_namespace(packets: &[Packet]) -> Vec<(&str, Vec<&Packet>)> {
    let mut groups: Vec<(&str, Vec<&Packet>)> = Vec::new();
    for packet in packets {
        match groups.iter_mut().find(|(ns, _)| *ns == packet.namespace) {
            Some((_, members)) => members.push(packet),
            None => groups.push((packet.namespace.as_str(), vec![packet])),
        }
    }
    groups
}
