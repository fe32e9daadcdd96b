use crate::mount::{BoundSocket, PeerServer, RelayService, ServeError};
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum_server::tls_rustls::RustlsConfig;
use beacon_core::ServerConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

/// Bind, mount and serve a stand-alone presence server until the listener fails.
///
/// Serves HTTPS when `config.ssl` holds a complete key/cert pair. `on_ready`
/// runs once the socket is bound and the relay has been initialized.
pub async fn serve<F>(
    mut config: ServerConfig,
    relay: Arc<dyn RelayService>,
    on_ready: F,
) -> Result<(), ServeError>
where
    F: FnOnce(BoundSocket) + Send,
{
    let tls = config.take_tls();
    if tls.is_none() && config.ssl.is_some() {
        warn!("Incomplete TLS key/cert pair, serving plain HTTP");
    }

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| ServeError::Bind {
            addr: format!("{}:{}", config.host, config.port),
            source,
        })?;
    let socket = BoundSocket::from_listener(&listener, tls.is_some())?;

    let cors = cors_layer(&config.cors_origins);
    let peer_server = PeerServer::new(config, relay);
    let app = peer_server
        .mount(peer_server.router(), Some(&socket))
        .await?
        .layer(cors);

    info!(
        "Presence server listening on {}://{}",
        if socket.is_tls() { "https" } else { "http" },
        socket.local_addr()
    );
    on_ready(socket);

    match tls {
        None => axum::serve(listener, app).await?,
        Some((key, cert)) => {
            let rustls = RustlsConfig::from_pem_file(&cert, &key)
                .await
                .map_err(ServeError::Tls)?;
            axum_server::from_tcp_rustls(listener.into_std()?, rustls)
                .serve(app.into_make_service())
                .await?
        }
    }

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
