use beacon_core::{ConnectionId, UserId};

use crate::integration::{create_test_hub, init_tracing};

#[tokio::test]
async fn test_arrivals_follow_join_order() {
    init_tracing();

    let (handle, output) = create_test_hub();

    let users: Vec<UserId> = (1..=5).map(|i| UserId::from(format!("u{i}"))).collect();
    let conns: Vec<ConnectionId> = users.iter().map(|_| ConnectionId::new()).collect();

    for (conn, user) in conns.iter().zip(&users) {
        handle.connect(*conn).await.unwrap();
        handle.join(*conn, "r1".into(), user.clone()).await.unwrap();
    }

    let rooms = handle.snapshot().await.unwrap();
    assert_eq!(rooms.get("r1"), Some(&users));

    // The first joiner hears about everyone else, once each, in join order.
    assert_eq!(output.arrivals_seen_by(&conns[0]).await, users[1..].to_vec());

    // Later joiners only hear about the ones after them, never about themselves.
    for (k, conn) in conns.iter().enumerate() {
        let seen = output.arrivals_seen_by(conn).await;
        assert_eq!(seen, users[k + 1..].to_vec(), "connection #{k}");
        assert!(!seen.contains(&users[k]));
    }
}
