//! Discriminator dispatch for the watched instruction set.
//!
//! Anchor programs prefix instruction data with the first 8 bytes of
//! sha256("global:<method_name>"). The prefix is compared as a little-endian
//! u64; anything outside the known set maps to `Unknown` and is never
//! decoded further.

/// Width of the discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

/// `create` discriminator: sha256("global:create")[0..8].
pub const CREATE: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];

/// `buy` discriminator.
pub const BUY: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];

/// `sell` discriminator.
pub const SELL: [u8; 8] = [51, 230, 133, 164, 1, 127, 131, 173];

const CREATE_U64: u64 = u64::from_le_bytes(CREATE);
const BUY_U64: u64 = u64::from_le_bytes(BUY);
const SELL_U64: u64 = u64::from_le_bytes(SELL);

/// Semantic kind of an instruction payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Create,
    Buy,
    Sell,
    Unknown,
}

impl InstructionKind {
    /// The program's log line announcing this instruction, used as a cheap
    /// gate before any base64 work on the logs path.
    pub fn log_marker(&self) -> Option<&'static str> {
        match self {
            Self::Create => Some("Program log: Instruction: Create"),
            Self::Buy => Some("Program log: Instruction: Buy"),
            Self::Sell => Some("Program log: Instruction: Sell"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a payload by its discriminator prefix.
///
/// Payloads shorter than the prefix are `Unknown`; they are rejected here,
/// before any dispatch.
pub fn classify_discriminator(data: &[u8]) -> InstructionKind {
    let Some(head) = data.get(..DISCRIMINATOR_LEN) else {
        return InstructionKind::Unknown;
    };
    let mut raw = [0u8; DISCRIMINATOR_LEN];
    raw.copy_from_slice(head);

    match u64::from_le_bytes(raw) {
        CREATE_U64 => InstructionKind::Create,
        BUY_U64 => InstructionKind::Buy,
        SELL_U64 => InstructionKind::Sell,
        _ => InstructionKind::Unknown,
    }
}
