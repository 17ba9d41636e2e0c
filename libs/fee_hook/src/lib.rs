//! # Dynamic Fee Hook - Volatility-Priced Swap Fees
//!
//! ## Purpose
//!
//! Fee-control engine for AMM pools whose host exchange delegates fee
//! decisions to a hook. Tracks an exponentially weighted estimate of each
//! pool's price volatility, quotes a swap fee from it, and skims a
//! governance-set protocol share of every realized fee into a per-token
//! ledger that the treasury can withdraw.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Host callbacks (`after_initialize`, `before_swap`, `after_swap`) carrying the pool key, current sqrt price and realized fee
//! - **Output Destinations**: Swap fee quotes with the override flag, `HookEvent` lists, treasury transfers via [`TokenTransfer`]
//! - **Governance**: Owner-gated setters for protocol share, treasury, volatility parameters and ownership
//! - **Configuration**: [`DynamicFeeHook::from_settings`] builds a hook from `hook-config` TOML settings
//!
//! ## Architecture Role
//!
//! ```text
//! Host exchange ──callbacks──▶ DynamicFeeHook ──▶ PoolRegistry (per-pool volatility, fee, swap guard)
//!                                   │
//!                                   ├──▶ VolatilityTracker ──▶ FeeCurve ──▶ fee quote
//!                                   │
//!                                   └──▶ ProtocolLedger ──withdraw──▶ TokenTransfer ──▶ treasury
//! ```
//!
//! All arithmetic is integer: fees in pips (1e-6), shares in basis points,
//! volatility in units of 1e-8. Commands validate before they mutate, so an
//! error always leaves the hook unchanged.

pub mod accounting;
pub mod constants;
pub mod errors;
pub mod events;
pub mod fee_curve;
pub mod governance;
pub mod hook;
pub mod pool;
pub mod settings;
pub mod types;
pub mod volatility;

pub use accounting::{ProtocolLedger, TokenTransfer};
pub use errors::{ErrorKind, HookError, TransferError};
pub use events::HookEvent;
pub use fee_curve::FeeCurve;
pub use governance::GlobalConfig;
pub use hook::{DynamicFeeHook, HookPermissions, SwapQuote};
pub use pool::{PoolRegistry, PoolState, SwapGuard};
pub use types::{Address, Currency, PoolId, PoolKey};
pub use volatility::{VolatilityParams, VolatilitySnapshot, VolatilityTracker};

/// Re-exported so callers can build prices and addresses without a direct dependency
pub use ethereum_types::{H160, H256, U256};
