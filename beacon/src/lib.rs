pub use beacon_core::model::{ConnectionId, RoomId, UserId};

pub mod model {
    pub use beacon_core::model::*;
}

pub mod config {
    pub use beacon_core::config::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use beacon_server::*;
}
