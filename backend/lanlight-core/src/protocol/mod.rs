//! Protocol types. `wire` and `message` are hand-written; the rest is
//! generated from `protocol.yml` by the build script.

pub mod message;
pub mod wire;

#[allow(clippy::all, dead_code, unused_imports)]
pub mod enums {
    include!(concat!(env!("OUT_DIR"), "/protocol/enums.rs"));
}

#[allow(clippy::all, dead_code, unused_imports)]
pub mod fields {
    include!(concat!(env!("OUT_DIR"), "/protocol/fields.rs"));
}

#[allow(clippy::all, dead_code, unused_imports)]
pub mod unions {
    include!(concat!(env!("OUT_DIR"), "/protocol/unions.rs"));
}

#[allow(clippy::all, dead_code, unused_imports)]
pub mod packets {
    include!(concat!(env!("OUT_DIR"), "/protocol/packets/helpers.rs"));
}

#[allow(clippy::all, clippy::large_enum_variant, dead_code, unused_imports)]
pub mod payloads {
    include!(concat!(env!("OUT_DIR"), "/protocol/payloads.rs"));
}

pub use message::{HEADER_SIZE, Header, Message};
pub use payloads::Payload;
pub use wire::{Packet, Wire};
