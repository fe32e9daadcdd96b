pub mod mount_tests;

use std::sync::Arc;
use tracing::Level;

use beacon_server::{PresenceHandle, PresenceHub};

use crate::utils::MockPresenceOutput;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_hub() -> (PresenceHandle, MockPresenceOutput) {
    let (handle, cmd_rx) = PresenceHub::channel();
    let output = MockPresenceOutput::new_stored_only();

    let hub = PresenceHub::new(cmd_rx, Arc::new(output.clone()));

    tokio::spawn(async move {
        hub.run().await;
    });

    (handle, output)
}
