//! EWMA volatility tracking per pool
//!
//! Volatility is the smoothed relative price move between consecutive
//! observations, in units where `VOLATILITY_PRECISION` is a 100% move.
//! Integer math only, so replaying the same observations always yields the
//! same estimate.

use crate::constants::{
    DEFAULT_EWMA_ALPHA, DEFAULT_FEE_MULTIPLIER, DEFAULT_VOLATILITY_WINDOW, SCALE,
    VOLATILITY_PRECISION,
};
use crate::errors::HookError;
use ethereum_types::U256;
use serde::{Deserialize, Serialize};

/// Governance-controlled estimator parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatilityParams {
    /// Weight of a new sample, in units of 1/SCALE
    pub ewma_alpha: u64,
    /// Seconds a previous observation stays fresh
    pub volatility_window: u64,
    /// Fee premium (pips) per unit of volatility, in units of 1/SCALE
    pub fee_multiplier: u64,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            ewma_alpha: DEFAULT_EWMA_ALPHA,
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            fee_multiplier: DEFAULT_FEE_MULTIPLIER,
        }
    }
}

impl VolatilityParams {
    /// All three must be positive and alpha may not exceed `SCALE`
    pub fn validate(&self) -> Result<(), HookError> {
        if self.ewma_alpha == 0 || self.ewma_alpha > SCALE {
            return Err(HookError::InvalidFeeRange {
                field: "ewma_alpha",
                value: self.ewma_alpha,
            });
        }
        if self.volatility_window == 0 {
            return Err(HookError::InvalidFeeRange {
                field: "volatility_window",
                value: self.volatility_window,
            });
        }
        if self.fee_multiplier == 0 {
            return Err(HookError::InvalidFeeRange {
                field: "fee_multiplier",
                value: self.fee_multiplier,
            });
        }
        Ok(())
    }
}

/// Estimator state carried by each pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolatilitySnapshot {
    pub ewma_volatility: u128,
    pub last_sqrt_price_x96: U256,
    pub last_update: u64,
}

/// Volatility estimator functions
pub struct VolatilityTracker;

impl VolatilityTracker {
    /// First observation of a pool: no prior sample, so nothing to blend
    pub fn seed(sqrt_price_x96: U256, now: u64) -> VolatilitySnapshot {
        VolatilitySnapshot {
            ewma_volatility: 0,
            last_sqrt_price_x96: sqrt_price_x96,
            last_update: now,
        }
    }

    /// Fold a new price observation into the estimate
    ///
    /// - within the window: EWMA blend of the relative price move
    /// - between one and two windows: linear decay, sample discarded
    /// - two windows or more: reset to zero
    pub fn update(
        prior: &VolatilitySnapshot,
        sqrt_price_x96: U256,
        now: u64,
        params: &VolatilityParams,
    ) -> VolatilitySnapshot {
        let window = params.volatility_window.max(1);
        let elapsed = now.saturating_sub(prior.last_update);

        let ewma_volatility = if elapsed <= window {
            let sample = Self::price_move(prior.last_sqrt_price_x96, sqrt_price_x96);
            Self::ema_blend(prior.ewma_volatility, sample, params.ewma_alpha)
        } else {
            Self::decay(prior.ewma_volatility, elapsed, window)
        };

        VolatilitySnapshot {
            ewma_volatility,
            last_sqrt_price_x96: sqrt_price_x96,
            last_update: now.max(prior.last_update),
        }
    }

    /// Relative price move `|(next/last)^2 - 1|`, scaled by `VOLATILITY_PRECISION`
    ///
    /// Markers are square roots of the price, hence the squaring. Saturates
    /// at `u128::MAX` for extreme jumps.
    pub fn price_move(last_sqrt_price_x96: U256, next_sqrt_price_x96: U256) -> u128 {
        if last_sqrt_price_x96.is_zero() {
            return 0;
        }

        let precision = U256::from(VOLATILITY_PRECISION);
        let sqrt_ratio = next_sqrt_price_x96.saturating_mul(precision) / last_sqrt_price_x96;
        let price_ratio = sqrt_ratio.saturating_mul(sqrt_ratio) / precision;

        let change = if price_ratio >= precision {
            price_ratio - precision
        } else {
            precision - price_ratio
        };

        if change > U256::from(u128::MAX) {
            u128::MAX
        } else {
            change.as_u128()
        }
    }

    /// EWMA <- EWMA + alpha * (sample - EWMA) / SCALE
    pub fn ema_blend(ewma: u128, sample: u128, alpha: u64) -> u128 {
        let alpha = alpha.min(SCALE);
        if sample >= ewma {
            let delta = Self::mul_div(sample - ewma, alpha as u128, SCALE as u128);
            ewma.saturating_add(delta)
        } else {
            let delta = Self::mul_div(ewma - sample, alpha as u128, SCALE as u128);
            ewma - delta
        }
    }

    fn decay(ewma: u128, elapsed: u64, window: u64) -> u128 {
        let horizon = window.saturating_mul(2);
        if elapsed >= horizon {
            return 0;
        }
        Self::mul_div(ewma, (horizon - elapsed) as u128, window as u128)
    }

    /// `value * num / den` for `num <= den`, without intermediate overflow
    fn mul_div(value: u128, num: u128, den: u128) -> u128 {
        let product = U256::from(value) * U256::from(num) / U256::from(den);
        product.low_u128()
    }
}
