//! Streaming WebSocket client for Solana log/block subscriptions.
//!
//! Provides a long-lived stream client with:
//! - one parameterized subscription builder (log-mentions or full-block)
//! - keepalive pings under both idle and steady message flow
//! - automatic reconnection with a fixed delay, preserving the subscription
//! - per-message decode containment: malformed payloads never kill the loop

pub mod connection;
pub mod error;
pub mod message;
pub mod subscription;
pub mod transaction;

pub use connection::{ConnectionState, StreamClient, StreamConfig};
pub use error::{WsError, WsResult};
pub use message::{
    parse_stream_message, program_data_payload, BlockPayload, BlockTransaction, BlockValue,
    LogsValue, RpcNotification, StreamMessage, PROGRAM_DATA_PREFIX,
};
pub use subscription::{Commitment, StreamKind, SubscribeRequest, SUBSCRIBE_REQUEST_ID};
pub use transaction::{NullTransactionDecoder, TransactionDecoder};

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
