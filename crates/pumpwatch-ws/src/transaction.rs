//! Transaction deserialization seam.
//!
//! Turning raw transaction bytes into ordered instructions plus the account
//! key table is delegated to a collaborator; the stream client only needs
//! the positional view back.

use pumpwatch_core::DecodedTransaction;

/// External transaction deserializer.
pub trait TransactionDecoder: Send + Sync {
    /// Deserialize raw transaction bytes into instructions and account keys.
    ///
    /// Returns `None` when the payload is not a recognizable transaction;
    /// the notification is then skipped without disturbing the stream.
    fn decode_transaction(&self, bytes: &[u8]) -> Option<DecodedTransaction>;
}

/// Decoder for streams that never carry transaction payloads (log-mentions).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTransactionDecoder;

impl TransactionDecoder for NullTransactionDecoder {
    fn decode_transaction(&self, _bytes: &[u8]) -> Option<DecodedTransaction> {
        None
    }
}
