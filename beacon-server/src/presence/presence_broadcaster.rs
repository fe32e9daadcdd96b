use crate::presence::connection_registry::{ConnectionRegistry, Membership};
use crate::presence::room_directory::RoomDirectory;
use crate::signaling::PresenceOutput;
use beacon_core::{ConnectionId, RoomId, ServerMessage, UserId};
use std::sync::Arc;
use tracing::{debug, info};

/// Turns connection lifecycle events into `user-connected` / `user-disconnected` notices.
///
/// Owns both the registry and the directory, so one `&mut self` call covers a
/// membership change and its notice. Callers must serialize access (the
/// [`PresenceHub`](crate::PresenceHub) does).
pub struct PresenceBroadcaster {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    output: Arc<dyn PresenceOutput>,
}

impl PresenceBroadcaster {
    pub fn new(output: Arc<dyn PresenceOutput>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            directory: RoomDirectory::new(),
            output,
        }
    }

    pub fn on_connect(&mut self, connection: ConnectionId) {
        if !self.registry.register(connection) {
            debug!("Connection {} already registered", connection);
        }
    }

    /// Empty ids and repeated joins are dropped without a reply.
    pub async fn on_join(&mut self, connection: ConnectionId, room_id: RoomId, user_id: UserId) {
        if room_id.is_empty() || user_id.is_empty() {
            debug!(
                "Dropping join-room from {}: room {:?}, user {:?}",
                connection, room_id, user_id
            );
            return;
        }

        if !self
            .registry
            .record_join(&connection, room_id.clone(), user_id.clone())
        {
            debug!(
                "Dropping join-room from {}: not in Connected state ({:?})",
                connection,
                self.registry.membership(&connection)
            );
            return;
        }

        self.directory.admit(&room_id, connection, user_id.clone());
        info!("User {} joined room '{}' ({})", user_id, room_id, connection);

        let targets = self.directory.members_except(&room_id, &connection);
        self.fan_out(targets, ServerMessage::UserConnected { user_id })
            .await;
    }

    /// Safe for any id, including ones that never joined or were never registered.
    pub async fn on_disconnect(&mut self, connection: ConnectionId) {
        let Some(Membership::Joined { room_id, user_id }) = self.registry.remove(&connection) else {
            debug!("Connection {} closed without joining a room", connection);
            return;
        };

        self.directory.evict(&room_id, &connection);
        info!("User {} left room '{}' ({})", user_id, room_id, connection);

        let targets = self.directory.members_except(&room_id, &connection);
        self.fan_out(targets, ServerMessage::UserDisconnected { user_id })
            .await;
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    async fn fan_out(&self, targets: Vec<ConnectionId>, msg: ServerMessage) {
        debug!("Fanning out {:?} to {} connection(s)", msg, targets.len());
        for target in targets {
            self.output.send_presence(target, msg.clone()).await;
        }
    }
}
