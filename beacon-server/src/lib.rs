//! Room based presence broadcasting for peer-to-peer signaling.
//!
//! Clients open a WebSocket, send `join-room` and from then on hear
//! `user-connected` / `user-disconnected` for the other members of their room.

mod mount;
mod presence;
mod signaling;

pub use mount::*;
pub use presence::*;
pub use signaling::*;
