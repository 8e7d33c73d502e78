//! Stream client error types.

use thiserror::Error;

/// Connection-level failures.
///
/// None of these are fatal to the process: the client logs the error,
/// transitions to `Reconnecting`, and resubscribes after a fixed delay. The
/// only terminal condition is caller-initiated cancellation.
#[derive(Debug, Error)]
pub enum WsError {
    #[error("connection closed: code={code}, reason={reason}")]
    ConnectionClosed { code: u16, reason: String },

    #[error("subscribe failed: {0}")]
    SubscribeFailed(String),

    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type WsResult<T> = Result<T, WsError>;
