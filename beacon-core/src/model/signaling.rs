use crate::model::room::RoomId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

/// Frames a client may send on its presence socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Fields stay optional so an incomplete join parses and is then dropped
    /// by validation instead of failing at the codec.
    JoinRoom {
        #[serde(rename = "roomId", default)]
        room_id: Option<RoomId>,
        #[serde(rename = "userId", default)]
        user_id: Option<UserId>,
    },
}

/// Presence notices fanned out to the other members of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    UserConnected {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
    UserDisconnected {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
}
