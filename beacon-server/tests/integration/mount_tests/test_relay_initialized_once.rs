use beacon_core::ServerConfig;
use beacon_server::{BoundSocket, MountError, PeerServer};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::integration::init_tracing;
use crate::utils::MockRelay;

fn socket() -> BoundSocket {
    BoundSocket::new(SocketAddr::from(([127, 0, 0, 1], 9000)), false)
}

#[tokio::test]
async fn test_relay_initialized_once() {
    init_tracing();

    let relay = MockRelay::new();
    let server = PeerServer::new(ServerConfig::default(), Arc::new(relay.clone()));

    server.mount(server.router(), Some(&socket())).await.unwrap();
    server.mount(server.router(), Some(&socket())).await.unwrap();
    server.clone().mount(server.router(), Some(&socket())).await.unwrap();

    assert_eq!(relay.sockets().await, vec![socket()]);
    assert!(server.is_mounted());
}

#[tokio::test]
async fn test_relay_failure_is_reported() {
    init_tracing();

    let relay = MockRelay::failing();
    let server = PeerServer::new(ServerConfig::default(), Arc::new(relay.clone()));

    let res = server.mount(server.router(), Some(&socket())).await;

    assert!(matches!(res, Err(MountError::Relay(_))));
    assert_eq!(relay.init_count().await, 1);
}
