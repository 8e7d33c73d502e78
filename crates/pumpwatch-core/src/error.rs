//! Error types for pumpwatch-core.

use thiserror::Error;

/// Pricing failures over a bonding-curve state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    #[error("virtual token reserves are zero")]
    DivisionByZero,

    #[error("bonding curve is complete; price formula no longer applies")]
    CurveComplete,
}

/// Failures deserializing a bonding-curve account.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("account data too short: {actual} bytes, need {expected}")]
    TooShort { expected: usize, actual: usize },
}
