use async_trait::async_trait;
use axum::Router;
use beacon_core::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The listener the composite application is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundSocket {
    local_addr: SocketAddr,
    tls: bool,
}

impl BoundSocket {
    pub fn new(local_addr: SocketAddr, tls: bool) -> Self {
        Self { local_addr, tls }
    }

    pub fn from_listener(listener: &TcpListener, tls: bool) -> std::io::Result<Self> {
        Ok(Self::new(listener.local_addr()?, tls))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_tls(&self) -> bool {
        self.tls
    }
}

/// Everything the relay receives when the adapter is mounted.
#[derive(Clone)]
pub struct RelayContext {
    /// The host's composite application, presence routes included. The relay
    /// registers its own routes on it and hands it back.
    pub app: Router,
    pub socket: BoundSocket,
    pub config: Arc<ServerConfig>,
}

/// Peer-id registration and message relaying, provided by the host.
///
/// [`PeerServer::mount`](crate::PeerServer::mount) calls `initialize` at most
/// once, and only with a bound socket. The returned router is what gets served.
#[async_trait]
pub trait RelayService: Send + Sync + 'static {
    async fn initialize(&self, ctx: RelayContext) -> anyhow::Result<Router>;
}

/// Relay that only logs, for running the presence broadcaster on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRelay;

#[async_trait]
impl RelayService for NullRelay {
    async fn initialize(&self, ctx: RelayContext) -> anyhow::Result<Router> {
        info!(
            "No relay configured; presence only on {} (key '{}')",
            ctx.socket.local_addr(),
            ctx.config.key
        );
        Ok(ctx.app)
    }
}
