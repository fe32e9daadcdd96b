use thiserror::Error;

#[derive(Debug, Error)]
pub enum MountError {
    /// The relay needs a live listener. There is no degraded mode without one.
    #[error("no bound socket was supplied, cannot start the relay")]
    MissingSocket,

    #[error("relay initialization failed: {0:#}")]
    Relay(anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load TLS credentials: {0}")]
    Tls(#[source] std::io::Error),

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
