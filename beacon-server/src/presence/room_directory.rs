use beacon_core::{ConnectionId, RoomId, UserId};
use std::collections::{BTreeMap, HashMap};

/// Room id -> user ids present, sorted. Diagnostic view of a [`RoomDirectory`].
pub type RoomSnapshot = BTreeMap<RoomId, Vec<UserId>>;

/// Room id -> members. Rooms exist only while they have at least one member.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, HashMap<ConnectionId, UserId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the room on first admit. Returns `false` if the connection was already a member.
    pub fn admit(&mut self, room_id: &RoomId, connection: ConnectionId, user_id: UserId) -> bool {
        let members = self.rooms.entry(room_id.clone()).or_default();
        if members.contains_key(&connection) {
            return false;
        }
        members.insert(connection, user_id);
        true
    }

    /// Drops the room once its last member is gone. Returns the evicted member's user id.
    pub fn evict(&mut self, room_id: &RoomId, connection: &ConnectionId) -> Option<UserId> {
        let members = self.rooms.get_mut(room_id)?;
        let user_id = members.remove(connection);
        if members.is_empty() {
            self.rooms.remove(room_id);
        }
        user_id
    }

    /// Fan-out targets: every member of `room_id` except `connection`.
    pub fn members_except(&self, room_id: &RoomId, connection: &ConnectionId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| {
                members
                    .keys()
                    .filter(|member| *member != connection)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map_or(0, HashMap::len)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        self.rooms
            .iter()
            .map(|(room_id, members)| {
                let mut users: Vec<UserId> = members.values().cloned().collect();
                users.sort();
                (room_id.clone(), users)
            })
            .collect()
    }
}
