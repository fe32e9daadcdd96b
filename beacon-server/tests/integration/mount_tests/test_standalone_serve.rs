use beacon_core::{ServerConfig, ServerOptions};
use beacon_server::serve;
use std::sync::Arc;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use crate::integration::init_tracing;
use crate::utils::{MOCK_RELAY_ID, MockRelay, WsTestClient};

/// Plain HTTP/1.1 GET, returning the full raw response.
async fn http_get(addr: SocketAddr, path: &str) -> anyhow::Result<String> {
    let mut stream = TcpStream::connect(addr).await?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let mut response = String::new();
    stream.read_to_string(&mut response).await?;
    Ok(response)
}

#[tokio::test]
async fn test_standalone_serve() {
    init_tracing();

    let config = ServerConfig::default().merged(ServerOptions {
        host: Some("127.0.0.1".into()),
        port: Some(0),
        path: Some("/myapp".into()),
        ..ServerOptions::default()
    });
    let relay = MockRelay::new();
    let (ready_tx, ready_rx) = oneshot::channel();

    let server = tokio::spawn(serve(config, Arc::new(relay.clone()), move |socket| {
        let _ = ready_tx.send(socket);
    }));

    let socket = tokio::time::timeout(Duration::from_secs(5), ready_rx)
        .await
        .expect("server never became ready")
        .expect("server exited before ready");

    assert!(!socket.is_tls());
    assert_ne!(socket.local_addr().port(), 0);
    assert_eq!(relay.sockets().await, vec![socket]);

    let mut client = WsTestClient::connect(socket.local_addr(), "/myapp/presence")
        .await
        .expect("presence route not mounted under path");
    client.join("r1", "u1").await.unwrap();
    client.close().await.unwrap();

    let response = http_get(socket.local_addr(), "/myapp/id").await.unwrap();
    assert!(
        response.starts_with("HTTP/1.1 200"),
        "relay route not served: {response}"
    );
    assert!(response.ends_with(MOCK_RELAY_ID));

    server.abort();
}
