use beacon_core::{ConnectionId, UserId};

use crate::integration::{create_test_hub, init_tracing};

#[tokio::test]
async fn test_malformed_join_is_dropped() {
    init_tracing();

    let (handle, output) = create_test_hub();
    let a = ConnectionId::new();
    let b = ConnectionId::new();

    handle.connect(a).await.unwrap();
    handle.connect(b).await.unwrap();
    handle.join(a, "r1".into(), "u1".into()).await.unwrap();
    let before = handle.snapshot().await.unwrap();

    handle.join(b, "".into(), "u2".into()).await.unwrap();
    handle.join(b, "r1".into(), "".into()).await.unwrap();
    handle.join(b, "".into(), "".into()).await.unwrap();

    let after = handle.snapshot().await.unwrap();
    assert_eq!(before, after);
    assert!(output.all().await.is_empty());

    // The connection is still usable after a dropped join.
    handle.join(b, "r1".into(), "u2".into()).await.unwrap();
    handle.snapshot().await.unwrap();
    assert_eq!(output.arrivals_seen_by(&a).await, vec![UserId::from("u2")]);
}
