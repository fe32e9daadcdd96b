use crate::presence::room_directory::RoomSnapshot;
use beacon_core::{ConnectionId, RoomId, UserId};
use tokio::sync::oneshot;

/// Commands the WebSocket layer feeds into the presence hub.
#[derive(Debug)]
pub enum PresenceCommand {
    /// Transport accepted a new connection.
    Connect { connection: ConnectionId },

    /// `join-room` arrived. Ids may be empty; the hub validates them.
    JoinRoom {
        connection: ConnectionId,
        room_id: RoomId,
        user_id: UserId,
    },

    /// Transport closed the connection, for whatever reason.
    Disconnect { connection: ConnectionId },

    /// Read the current rooms, ordered after every command sent before it.
    Snapshot { reply: oneshot::Sender<RoomSnapshot> },
}
