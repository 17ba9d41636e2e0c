//! Volatility to swap fee mapping
//!
//! Pure functions: safe to call for quotes and previews without touching
//! pool state.

use crate::constants::{BASE_FEE, MAX_FEE, MIN_FEE, OVERRIDE_FEE_FLAG, PIPS_DENOMINATOR, SCALE};

/// Dynamic fee curve
pub struct FeeCurve;

impl FeeCurve {
    /// `clamp(BASE_FEE + volatility * multiplier / SCALE, MIN_FEE, MAX_FEE)`
    ///
    /// Out-of-range raw values saturate at the bounds, including when the
    /// premium itself overflows.
    pub fn compute_fee(ewma_volatility: u128, fee_multiplier: u64) -> u32 {
        let premium = ewma_volatility
            .checked_mul(fee_multiplier as u128)
            .map(|scaled| scaled / SCALE as u128)
            .unwrap_or(u128::MAX);

        let raw = (BASE_FEE as u128).saturating_add(premium);
        raw.clamp(MIN_FEE as u128, MAX_FEE as u128) as u32
    }

    /// Fee as returned to the host from the before-swap callback
    pub fn with_override_flag(fee: u32) -> u32 {
        fee | OVERRIDE_FEE_FLAG
    }

    /// Fee taken from `amount_in` at `fee_pips`, rounded down
    pub fn fee_amount(amount_in: u128, fee_pips: u32) -> u128 {
        let fee_pips = fee_pips.min(PIPS_DENOMINATOR) as u128;
        match amount_in.checked_mul(fee_pips) {
            Some(scaled) => scaled / PIPS_DENOMINATOR as u128,
            None => amount_in / PIPS_DENOMINATOR as u128 * fee_pips,
        }
    }
}
