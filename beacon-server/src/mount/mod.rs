mod error;
mod peer_server;
mod relay;
mod serve;

pub use error::*;
pub use peer_server::*;
pub use relay::*;
pub use serve::*;
