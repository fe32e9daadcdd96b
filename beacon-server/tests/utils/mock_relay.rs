use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use beacon_server::{BoundSocket, RelayContext, RelayService};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Body served by the route the mock relay registers.
pub const MOCK_RELAY_ID: &str = "mock-relay-id";

/// RelayService that records every initialization it receives and registers
/// `GET {path}/id` on the application it is handed.
#[derive(Clone, Default)]
pub struct MockRelay {
    calls: Arc<Mutex<Vec<BoundSocket>>>,
    fail: bool,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// A relay whose initialization always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn init_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    pub async fn sockets(&self) -> Vec<BoundSocket> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl RelayService for MockRelay {
    async fn initialize(&self, ctx: RelayContext) -> anyhow::Result<Router> {
        tracing::debug!("[MockRelay] initialize on {}", ctx.socket.local_addr());
        self.calls.lock().await.push(ctx.socket);

        if self.fail {
            anyhow::bail!("relay refused to start");
        }

        let route = format!("{}/id", ctx.config.mount_path().unwrap_or_default());
        Ok(ctx.app.route(&route, get(|| async { MOCK_RELAY_ID })))
    }
}
