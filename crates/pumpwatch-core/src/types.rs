//! Transaction views and decoded events.
//!
//! `DecodedTransaction` and `Instruction` are the positional-index view the
//! external transaction deserializer produces; `CreateEvent` is the typed
//! record recovered from a create instruction's data bytes.

use solana_pubkey::Pubkey;

/// A single instruction inside a transaction.
///
/// `account_indexes` reference positions in the owning transaction's
/// `account_keys`; `program_id_index` names the owning program the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id_index: u8,
    pub account_indexes: Vec<u8>,
    pub data: Vec<u8>,
}

/// Ordered instructions plus the account-key table they index into.
///
/// Produced by the external transaction deserializer from a notification's
/// base64 payload and discarded after instruction extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub account_keys: Vec<Pubkey>,
    pub instructions: Vec<Instruction>,
}

/// A decoded token-creation event.
///
/// Field order matches the on-chain payload schema exactly. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEvent {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub associated_user: Pubkey,
    pub user: Pubkey,
    pub source: Pubkey,
}

impl CreateEvent {
    /// Whether `watched` appears among this event's address fields.
    ///
    /// Byte-level comparison; text encodings never enter into it. Used on the
    /// logs path, where no per-instruction account list is available.
    pub fn mentions(&self, watched: &Pubkey) -> bool {
        [
            &self.mint,
            &self.bonding_curve,
            &self.associated_bonding_curve,
            &self.associated_user,
            &self.user,
            &self.source,
        ]
        .into_iter()
        .any(|key| key == watched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn sample_event() -> CreateEvent {
        CreateEvent {
            name: "Test Token".to_string(),
            symbol: "TT".to_string(),
            uri: "https://example.com/meta.json".to_string(),
            mint: key(1),
            bonding_curve: key(2),
            associated_bonding_curve: key(3),
            associated_user: key(4),
            user: key(5),
            source: key(6),
        }
    }

    #[test]
    fn test_mentions_user() {
        let event = sample_event();
        assert!(event.mentions(&key(5)));
    }

    #[test]
    fn test_mentions_mint() {
        let event = sample_event();
        assert!(event.mentions(&key(1)));
    }

    #[test]
    fn test_mentions_absent() {
        let event = sample_event();
        assert!(!event.mentions(&key(9)));
    }
}
