use crate::signaling::SignalingService;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use beacon_core::{ClientMessage, ConnectionId};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Route of the presence socket, relative to the mount path.
pub const PRESENCE_ROUTE: &str = "/presence";

/// Stand-alone router carrying only the presence socket.
pub fn presence_router(service: SignalingService) -> Router {
    Router::new()
        .route(PRESENCE_ROUTE, get(ws_handler))
        .with_state(service)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let connection = ConnectionId::new();
    let forwarded_for = client_addr(service.is_proxied(), &headers);

    ws.on_upgrade(move |socket| handle_socket(socket, connection, forwarded_for, service))
}

/// Client address reported by the proxy, trusted only when running proxied.
fn client_addr(proxied: bool, headers: &HeaderMap) -> Option<String> {
    if proxied { forwarded_for(headers) } else { None }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("x-forwarded-for")?.to_str().ok()?;
    value
        .split(',')
        .next()
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_owned)
}

async fn handle_socket(
    socket: WebSocket,
    connection: ConnectionId,
    forwarded_for: Option<String>,
    service: SignalingService,
) {
    match &forwarded_for {
        Some(addr) => info!("New presence connection {} (client {})", connection, addr),
        None => info!("New presence connection {}", connection),
    }

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(connection, tx);

    if let Err(e) = service.presence.connect(connection).await {
        error!("Cannot register {}: {}", connection, e);
        service.remove_connection(&connection);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(ClientMessage::JoinRoom { room_id, user_id }) => {
                            let joined = service
                                .presence
                                .join(
                                    connection,
                                    room_id.unwrap_or_default(),
                                    user_id.unwrap_or_default(),
                                )
                                .await;
                            if let Err(e) = joined {
                                error!("Presence hub died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Ignoring malformed frame from {}: {}", connection, e),
                    },
                    Message::Close(_) => break,
                    _ => debug!("Ignoring non-text frame from {}", connection),
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Whichever side ended first, the hub must see exactly one disconnect.
    if let Err(e) = service.presence.disconnect(connection).await {
        error!("Cannot unregister {}: {}", connection, e);
    }
    service.remove_connection(&connection);
    info!("Presence connection closed: {}", connection);
}
