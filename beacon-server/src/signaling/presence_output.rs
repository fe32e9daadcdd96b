use beacon_core::{ConnectionId, ServerMessage};
use async_trait::async_trait;

/// Implemented by whatever owns the client sockets, so the presence hub can
/// deliver notices without knowing the transport.
#[async_trait]
pub trait PresenceOutput: Send + Sync {
    /// Deliver one notice to one connection. Fire-and-forget: no delivery
    /// confirmation, and an already closed target is not an error.
    async fn send_presence(&self, connection: ConnectionId, msg: ServerMessage);
}
