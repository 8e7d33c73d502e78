//! Watched-address classification over an instruction's referenced accounts.

use crate::discriminator::{classify_discriminator, InstructionKind};
use pumpwatch_core::{Instruction, Pubkey};

/// Whether `watched` is among the accounts this instruction actually
/// references.
///
/// Only indexes in the instruction's own account list count; an address
/// present elsewhere in the transaction does not match. Comparison is
/// byte-for-byte, never on a text form. Out-of-range indexes are skipped.
pub fn matches(instruction: &Instruction, account_keys: &[Pubkey], watched: &Pubkey) -> bool {
    instruction
        .account_indexes
        .iter()
        .any(|&index| account_keys.get(index as usize).is_some_and(|key| key == watched))
}

/// Gate an instruction before any expensive decoding.
///
/// Checks run cheapest-first and short-circuit: owning program, then
/// discriminator membership in `kinds`, then the watched-address filter
/// (`None` matches every instruction). Returns the classified kind when all
/// gates pass.
pub fn screen_instruction(
    instruction: &Instruction,
    account_keys: &[Pubkey],
    program: &Pubkey,
    kinds: &[InstructionKind],
    watched: Option<&Pubkey>,
) -> Option<InstructionKind> {
    let owner = account_keys.get(instruction.program_id_index as usize)?;
    if owner != program {
        return None;
    }

    let kind = classify_discriminator(&instruction.data);
    if kind == InstructionKind::Unknown || !kinds.contains(&kind) {
        return None;
    }

    match watched {
        Some(address) if !matches(instruction, account_keys, address) => None,
        _ => Some(kind),
    }
}
