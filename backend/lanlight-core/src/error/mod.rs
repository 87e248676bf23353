pub mod client;
pub mod config;
pub mod session;
pub mod wire;

pub use client::ClientError;
pub use config::ConfigError;
pub use session::SessionError;
pub use wire::WireError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Client(#[from] client::ClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Session(#[from] session::SessionError),

    #[error(transparent)]
    Wire(#[from] wire::WireError),
}
