use beacon_core::{ConnectionId, RoomId, UserId};
use std::collections::HashMap;

/// Where a live connection stands in the room lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// Accepted by the transport, no valid join yet.
    Connected,
    /// Joined exactly one room under the given user id.
    Joined { room_id: RoomId, user_id: UserId },
}

/// Live connections and the identity asserted on each of them.
///
/// Removal is the `Disconnected` state: a removed id is never looked up again.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Membership>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the connection was already registered.
    pub fn register(&mut self, connection: ConnectionId) -> bool {
        if self.connections.contains_key(&connection) {
            return false;
        }
        self.connections.insert(connection, Membership::Connected);
        true
    }

    /// `Connected -> Joined`. Any other starting state leaves the registry untouched.
    pub fn record_join(&mut self, connection: &ConnectionId, room_id: RoomId, user_id: UserId) -> bool {
        match self.connections.get_mut(connection) {
            Some(state @ Membership::Connected) => {
                *state = Membership::Joined { room_id, user_id };
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, connection: &ConnectionId) -> Option<Membership> {
        self.connections.remove(connection)
    }

    pub fn membership(&self, connection: &ConnectionId) -> Option<&Membership> {
        self.connections.get(connection)
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
