use beacon_core::{ConnectionId, UserId};

use crate::integration::{create_test_hub, init_tracing};

#[tokio::test]
async fn test_first_joiner_hears_nothing() {
    init_tracing();

    let (handle, output) = create_test_hub();
    let a = ConnectionId::new();

    handle.connect(a).await.unwrap();
    handle.join(a, "r1".into(), "u1".into()).await.unwrap();

    let rooms = handle.snapshot().await.unwrap();
    assert_eq!(rooms.get("r1"), Some(&vec![UserId::from("u1")]));
    assert!(output.all().await.is_empty(), "joiner must not hear its own arrival");
}
