use crate::mount::{BoundSocket, MountError, RelayContext, RelayService};
use crate::presence::{PresenceHandle, PresenceHub};
use crate::signaling::{SignalingService, presence_router};
use axum::Router;
use beacon_core::ServerConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Presence broadcaster packaged as a unit a host application can attach.
///
/// Merge [`router`](Self::router) into the host app, bind the listener, then
/// pass the app and the bound socket to [`mount`](Self::mount) and serve the
/// router it returns.
#[derive(Clone)]
pub struct PeerServer {
    config: Arc<ServerConfig>,
    service: SignalingService,
    relay: Arc<dyn RelayService>,
    mounted: Arc<AtomicBool>,
}

impl PeerServer {
    /// Spawns the presence hub, so it must run inside a tokio runtime.
    pub fn new(config: ServerConfig, relay: Arc<dyn RelayService>) -> Self {
        let (presence, command_rx) = PresenceHub::channel();
        let service = SignalingService::new(presence, config.proxied);

        let hub = PresenceHub::new(command_rx, Arc::new(service.clone()));
        tokio::spawn(hub.run());

        Self {
            config: Arc::new(config),
            service,
            relay,
            mounted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Presence routes under the configured mount path.
    pub fn router(&self) -> Router {
        let presence = presence_router(self.service.clone());
        match self.config.mount_path() {
            Some(path) => Router::new().nest(&path, presence),
            None => presence,
        }
    }

    pub fn presence(&self) -> &PresenceHandle {
        self.service.presence()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Hand the host application and its bound socket to the relay, and
    /// return the application to serve, relay routes included.
    ///
    /// Without a socket this fails with [`MountError::MissingSocket`] and the
    /// relay is never touched. The relay is initialized once; later calls
    /// return `app` unchanged.
    pub async fn mount(
        &self,
        app: Router,
        socket: Option<&BoundSocket>,
    ) -> Result<Router, MountError> {
        let Some(socket) = socket else {
            error!("Mount attempted without a bound socket");
            return Err(MountError::MissingSocket);
        };

        if self.mounted.swap(true, Ordering::AcqRel) {
            warn!("Relay already initialized, ignoring mount on {}", socket.local_addr());
            return Ok(app);
        }

        info!("Mounting relay on {}", socket.local_addr());
        let ctx = RelayContext {
            app,
            socket: *socket,
            config: self.config.clone(),
        };
        self.relay.initialize(ctx).await.map_err(MountError::Relay)
    }
}
