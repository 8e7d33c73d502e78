//! Bonding-curve account state and spot pricing.
//!
//! The curve account mutates with every on-chain trade, so state is always
//! fetched fresh and never cached here. Pricing is a pure function over one
//! snapshot.

use crate::error::{CurveError, PricingError};

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Decimal places of the curve-minted token.
pub const TOKEN_DECIMALS: u32 = 6;

/// Anchor account data begins with an 8-byte discriminator.
const ACCOUNT_HEADER_LEN: usize = 8;

/// Bytes required after the header: five u64 fields plus one bool.
const STATE_LEN: usize = 5 * 8 + 1;

/// Reserve state of a constant-product bonding curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondingCurveState {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    pub complete: bool,
}

impl BondingCurveState {
    /// Deserialize curve state from raw account bytes.
    ///
    /// Layout: 8-byte account discriminator, then five little-endian u64
    /// reserve fields, then a one-byte `complete` flag.
    pub fn from_account_data(data: &[u8]) -> Result<Self, CurveError> {
        let expected = ACCOUNT_HEADER_LEN + STATE_LEN;
        if data.len() < expected {
            return Err(CurveError::TooShort {
                expected,
                actual: data.len(),
            });
        }

        let mut offset = ACCOUNT_HEADER_LEN;
        let mut next_u64 = || {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&data[offset..offset + 8]);
            offset += 8;
            u64::from_le_bytes(raw)
        };

        let virtual_token_reserves = next_u64();
        let virtual_sol_reserves = next_u64();
        let real_token_reserves = next_u64();
        let real_sol_reserves = next_u64();
        let token_total_supply = next_u64();
        let complete = data[offset] != 0;

        Ok(Self {
            virtual_token_reserves,
            virtual_sol_reserves,
            real_token_reserves,
            real_sol_reserves,
            token_total_supply,
            complete,
        })
    }

    /// Spot price in SOL per token.
    ///
    /// `virtual_sol_reserves / virtual_token_reserves`, with both sides
    /// rescaled out of their base units (lamports, raw token units).
    pub fn price(&self) -> Result<f64, PricingError> {
        if self.complete {
            return Err(PricingError::CurveComplete);
        }
        if self.virtual_token_reserves == 0 {
            return Err(PricingError::DivisionByZero);
        }

        let sol = self.virtual_sol_reserves as f64 / LAMPORTS_PER_SOL as f64;
        let tokens = self.virtual_token_reserves as f64 / 10u64.pow(TOKEN_DECIMALS) as f64;
        Ok(sol / tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_state(state: &BondingCurveState) -> Vec<u8> {
        let mut data = vec![0u8; ACCOUNT_HEADER_LEN];
        data.extend_from_slice(&state.virtual_token_reserves.to_le_bytes());
        data.extend_from_slice(&state.virtual_sol_reserves.to_le_bytes());
        data.extend_from_slice(&state.real_token_reserves.to_le_bytes());
        data.extend_from_slice(&state.real_sol_reserves.to_le_bytes());
        data.extend_from_slice(&state.token_total_supply.to_le_bytes());
        data.push(u8::from(state.complete));
        data
    }

    fn fresh_curve() -> BondingCurveState {
        BondingCurveState {
            virtual_token_reserves: 1_000_000_000_000,
            virtual_sol_reserves: 30_000_000_000,
            real_token_reserves: 800_000_000_000,
            real_sol_reserves: 0,
            token_total_supply: 1_000_000_000_000,
            complete: false,
        }
    }

    #[test]
    fn test_price_fixed_inputs() {
        // 30 SOL over 1_000_000 tokens.
        let price = fresh_curve().price().unwrap();
        assert_eq!(price, 3.0e-5);
    }

    #[test]
    fn test_price_is_deterministic() {
        let curve = fresh_curve();
        assert_eq!(curve.price().unwrap(), curve.price().unwrap());
    }

    #[test]
    fn test_price_zero_token_reserves() {
        let curve = BondingCurveState {
            virtual_token_reserves: 0,
            ..fresh_curve()
        };
        assert_eq!(curve.price(), Err(PricingError::DivisionByZero));
    }

    #[test]
    fn test_price_complete_curve_rejected() {
        let curve = BondingCurveState {
            complete: true,
            ..fresh_curve()
        };
        assert_eq!(curve.price(), Err(PricingError::CurveComplete));
    }

    #[test]
    fn test_account_round_trip() {
        let curve = fresh_curve();
        let decoded = BondingCurveState::from_account_data(&encode_state(&curve)).unwrap();
        assert_eq!(decoded, curve);
    }

    #[test]
    fn test_account_round_trip_complete_flag() {
        let curve = BondingCurveState {
            complete: true,
            ..fresh_curve()
        };
        let decoded = BondingCurveState::from_account_data(&encode_state(&curve)).unwrap();
        assert!(decoded.complete);
    }

    #[test]
    fn test_account_too_short() {
        let result = BondingCurveState::from_account_data(&[0u8; 16]);
        assert_eq!(
            result,
            Err(CurveError::TooShort {
                expected: 49,
                actual: 16
            })
        );
    }

    #[test]
    fn test_account_trailing_bytes_ignored() {
        // Live accounts carry fields past `complete` (e.g. the creator key).
        let mut data = encode_state(&fresh_curve());
        data.extend_from_slice(&[7u8; 32]);
        let decoded = BondingCurveState::from_account_data(&data).unwrap();
        assert_eq!(decoded, fresh_curve());
    }
}
