//! Subscription request construction.
//!
//! The JSON-RPC field names and enum strings below are wire format and must
//! be reproduced verbatim for protocol compatibility.

use pumpwatch_core::Pubkey;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Request id used for the one subscribe call made per connection.
pub const SUBSCRIBE_REQUEST_ID: u64 = 1;

/// Consistency level for observed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    #[default]
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

/// Which stream to subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Log lines from transactions mentioning the program.
    #[default]
    LogMentions,
    /// Full blocks with base64 transactions mentioning the program.
    FullBlock,
}

impl StreamKind {
    /// JSON-RPC subscribe method name.
    pub fn method(&self) -> &'static str {
        match self {
            Self::LogMentions => "logsSubscribe",
            Self::FullBlock => "blockSubscribe",
        }
    }

    /// Method name carried by data notifications on this stream.
    pub fn notification_method(&self) -> &'static str {
        match self {
            Self::LogMentions => "logsNotification",
            Self::FullBlock => "blockNotification",
        }
    }
}

/// Immutable subscription parameters, created once per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscribeRequest {
    pub program: Pubkey,
    pub commitment: Commitment,
    pub kind: StreamKind,
}

impl SubscribeRequest {
    /// Build the JSON-RPC subscribe envelope.
    pub fn to_json(&self) -> serde_json::Value {
        let program = self.program.to_string();
        match self.kind {
            StreamKind::LogMentions => json!({
                "jsonrpc": "2.0",
                "id": SUBSCRIBE_REQUEST_ID,
                "method": "logsSubscribe",
                "params": [
                    { "mentions": [program] },
                    { "commitment": self.commitment.as_str() }
                ]
            }),
            StreamKind::FullBlock => json!({
                "jsonrpc": "2.0",
                "id": SUBSCRIBE_REQUEST_ID,
                "method": "blockSubscribe",
                "params": [
                    { "mentionsAccountOrProgram": program },
                    {
                        "commitment": self.commitment.as_str(),
                        "encoding": "base64",
                        "showRewards": false,
                        "transactionDetails": "full",
                        "maxSupportedTransactionVersion": 0
                    }
                ]
            }),
        }
    }
}
