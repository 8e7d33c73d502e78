//! JSON-RPC stream message envelopes.
//!
//! Two shapes arrive on an open subscription: the one-time acknowledgement
//! (a response carrying the request id) and push notifications. Anything
//! else is ignored as a no-op, never an error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

/// Log-line prefix carrying a base64 event payload.
pub const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// A push notification delivered for an active subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcNotification {
    pub method: String,
    pub params: NotificationParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationParams {
    pub result: NotificationResult,
    #[serde(default)]
    pub subscription: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationResult {
    pub value: serde_json::Value,
}

/// Payload of a `logsNotification`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsValue {
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub logs: Vec<String>,
}

/// Payload of a `blockNotification`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockValue {
    #[serde(default)]
    pub slot: u64,
    #[serde(default)]
    pub block: Option<BlockPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockPayload {
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
}

/// One transaction entry: `[<base64 data>, "base64"]`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockTransaction {
    pub transaction: (String, String),
}

/// A classified incoming text frame.
#[derive(Debug)]
pub enum StreamMessage {
    /// One-time handshake reply to the subscribe request.
    Ack { id: u64, error: Option<String> },
    /// A data notification.
    Notification(RpcNotification),
    /// Anything else; discarded without comment.
    Other,
}

/// Classify an incoming text frame.
pub fn parse_stream_message(text: &str) -> StreamMessage {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return StreamMessage::Other;
    };

    if value.get("method").is_some() {
        match serde_json::from_value::<RpcNotification>(value) {
            Ok(notification) => return StreamMessage::Notification(notification),
            Err(_) => return StreamMessage::Other,
        }
    }

    if let Some(id) = value.get("id").and_then(serde_json::Value::as_u64) {
        let error = value.get("error").map(|e| {
            e.get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("subscription rejected")
                .to_string()
        });
        return StreamMessage::Ack { id, error };
    }

    StreamMessage::Other
}

/// Extract and decode the base64 payload of a `Program data:` log line.
pub fn program_data_payload(log: &str) -> Option<Vec<u8>> {
    let encoded = log.strip_prefix(PROGRAM_DATA_PREFIX)?;
    BASE64.decode(encoded.trim()).ok()
}
