use crate::presence::PresenceHandle;
use crate::signaling::PresenceOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, ServerMessage};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct SignalingInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
    proxied: bool,
}

/// Outbound side of every presence socket, shared with the axum handlers.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) presence: PresenceHandle,
}

impl SignalingService {
    pub fn new(presence: PresenceHandle, proxied: bool) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                connections: DashMap::new(),
                proxied,
            }),
            presence,
        }
    }

    pub fn presence(&self) -> &PresenceHandle {
        &self.presence
    }

    pub fn is_proxied(&self) -> bool {
        self.inner.proxied
    }

    pub fn add_connection(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(connection, tx);
    }

    pub fn remove_connection(&self, connection: &ConnectionId) {
        self.inner.connections.remove(connection);
    }

    pub fn send_message(&self, connection: ConnectionId, msg: &ServerMessage) {
        let Some(peer) = self.inner.connections.get(&connection) else {
            debug!(
                "Dropping {:?} for closed connection {}",
                msg, connection
            );
            return;
        };

        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = peer.send(Message::Text(json.into())) {
                    error!("Failed to send WS message to {}: {:?}", connection, e);
                }
            }
            Err(e) => error!("Failed to serialize presence message: {}", e),
        }
    }
}

#[async_trait]
impl PresenceOutput for SignalingService {
    async fn send_presence(&self, connection: ConnectionId, msg: ServerMessage) {
        self.send_message(connection, &msg);
    }
}
