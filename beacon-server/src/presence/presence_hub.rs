use crate::presence::presence_broadcaster::PresenceBroadcaster;
use crate::presence::presence_command::PresenceCommand;
use crate::presence::room_directory::RoomSnapshot;
use crate::signaling::PresenceOutput;
use beacon_core::{ConnectionId, RoomId, UserId};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

const COMMAND_BUFFER: usize = 256;

#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("presence hub is no longer running")]
    HubClosed,
}

/// The single task that owns all presence state.
///
/// Every registry/directory mutation and every notice is produced here, one
/// command at a time, so a departure notice and the matching eviction can
/// never interleave with another command for the same room.
pub struct PresenceHub {
    broadcaster: PresenceBroadcaster,
    command_rx: mpsc::Receiver<PresenceCommand>,
}

impl PresenceHub {
    pub fn new(command_rx: mpsc::Receiver<PresenceCommand>, output: Arc<dyn PresenceOutput>) -> Self {
        Self {
            broadcaster: PresenceBroadcaster::new(output),
            command_rx,
        }
    }

    /// Command channel for a hub that does not exist yet.
    ///
    /// The output usually needs the handle before the hub can be built.
    pub fn channel() -> (PresenceHandle, mpsc::Receiver<PresenceCommand>) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        (PresenceHandle { command_tx: tx }, rx)
    }

    pub async fn run(mut self) {
        info!("Presence hub started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Presence hub stopped.");
    }

    async fn handle_command(&mut self, cmd: PresenceCommand) {
        match cmd {
            PresenceCommand::Connect { connection } => {
                self.broadcaster.on_connect(connection);
            }

            PresenceCommand::JoinRoom {
                connection,
                room_id,
                user_id,
            } => {
                self.broadcaster.on_join(connection, room_id, user_id).await;
            }

            PresenceCommand::Disconnect { connection } => {
                self.broadcaster.on_disconnect(connection).await;
            }

            PresenceCommand::Snapshot { reply } => {
                if reply.send(self.broadcaster.directory().snapshot()).is_err() {
                    warn!("Snapshot requester went away");
                }
            }
        }
    }
}

/// Cloneable sender side of a [`PresenceHub`].
#[derive(Clone, Debug)]
pub struct PresenceHandle {
    command_tx: mpsc::Sender<PresenceCommand>,
}

impl PresenceHandle {
    pub async fn connect(&self, connection: ConnectionId) -> Result<(), PresenceError> {
        self.send(PresenceCommand::Connect { connection }).await
    }

    pub async fn join(
        &self,
        connection: ConnectionId,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<(), PresenceError> {
        self.send(PresenceCommand::JoinRoom {
            connection,
            room_id,
            user_id,
        })
        .await
    }

    pub async fn disconnect(&self, connection: ConnectionId) -> Result<(), PresenceError> {
        self.send(PresenceCommand::Disconnect { connection }).await
    }

    pub async fn snapshot(&self) -> Result<RoomSnapshot, PresenceError> {
        let (reply, rx) = oneshot::channel();
        self.send(PresenceCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| PresenceError::HubClosed)
    }

    async fn send(&self, cmd: PresenceCommand) -> Result<(), PresenceError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| PresenceError::HubClosed)
    }
}
