pub mod events;
pub mod mock_ws;
