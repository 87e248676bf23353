mod message;
mod payloads;
mod scenario;
mod wire;
