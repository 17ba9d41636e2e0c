//! Fee, share and fixed-point constants
//!
//! Fees are in pips, the host exchange's fee unit: 1_000_000 pips = 100%,
//! so 3_000 pips = 0.30% = 30 bps.

use hook_config::defaults;

/// Denominator of a fee expressed in pips
pub const PIPS_DENOMINATOR: u32 = 1_000_000;

/// Lowest fee the hook will ever charge (0.30%)
pub const MIN_FEE: u32 = 3_000;
/// Highest fee the hook will ever charge (1.00%)
pub const MAX_FEE: u32 = 10_000;
/// Fee charged at zero measured volatility (0.30%)
pub const BASE_FEE: u32 = 3_000;

/// Basis point denominator for protocol shares
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Largest protocol share governance may set (50%)
pub const MAX_PROTOCOL_SHARE: u64 = 5_000;

/// Fixed-point base for `ewma_alpha` and `fee_multiplier`
pub const SCALE: u64 = 10_000;
/// A volatility reading of this value is a 100% relative price move
pub const VOLATILITY_PRECISION: u64 = 100_000_000;

/// Pool key fee value marking a pool whose fee is set by its hook
pub const DYNAMIC_FEE_FLAG: u32 = 0x80_0000;
/// Or'ed into a before-swap fee so the host applies it to that swap
pub const OVERRIDE_FEE_FLAG: u32 = 0x40_0000;

pub const DEFAULT_PROTOCOL_SHARE_BPS: u64 = defaults::PROTOCOL_SHARE_BPS;
pub const DEFAULT_EWMA_ALPHA: u64 = defaults::volatility::EWMA_ALPHA;
pub const DEFAULT_VOLATILITY_WINDOW: u64 = defaults::volatility::VOLATILITY_WINDOW_SECS;
pub const DEFAULT_FEE_MULTIPLIER: u64 = defaults::volatility::FEE_MULTIPLIER;
