mod connection_registry;
mod presence_broadcaster;
mod presence_command;
mod presence_hub;
mod room_directory;

pub use connection_registry::*;
pub use presence_broadcaster::*;
pub use presence_command::*;
pub use presence_hub::*;
pub use room_directory::*;
