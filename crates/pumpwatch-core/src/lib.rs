//! Core domain types for the pumpwatch creation-stream sniper.
//!
//! This crate provides the fundamental types shared across the system:
//! - `CreateEvent`: a decoded token-creation event
//! - `Instruction`, `DecodedTransaction`: positional views over a transaction
//! - `BondingCurveState`: constant-product reserve state with spot pricing

pub mod curve;
pub mod error;
pub mod types;

pub use curve::{BondingCurveState, LAMPORTS_PER_SOL, TOKEN_DECIMALS};
pub use error::{CurveError, PricingError};
pub use types::{CreateEvent, DecodedTransaction, Instruction};

// Re-exported so downstream crates share a single Pubkey type.
pub use solana_pubkey::Pubkey;
