pub mod config;
pub mod model;

pub use config::{ConfigError, ServerConfig, ServerOptions, TlsConfig};
pub use model::{ClientMessage, ConnectionId, RoomId, ServerMessage, UserId};
