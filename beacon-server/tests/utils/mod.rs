pub mod mock_relay;

pub use mock_output::*;
pub use mock_relay::*;
pub use ws_client::*;
