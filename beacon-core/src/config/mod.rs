mod error;
mod server_config;

pub use error::ConfigError;
pub use server_config::{ServerConfig, ServerOptions, TlsConfig};
