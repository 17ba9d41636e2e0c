//! Events returned by hook operations
//!
//! Operations hand their events back to the caller instead of publishing
//! them, so the host decides whether to log, index or forward them.

use crate::types::{Address, Currency, PoolId};
use ethereum_types::U256;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HookEvent {
    /// A swap callback recomputed the pool fee
    DynamicFeeUpdated {
        pool_id: PoolId,
        dynamic_fee: u32,
        volatility: u128,
    },
    PoolInitialized {
        pool_id: PoolId,
        sqrt_price_x96: U256,
    },
    ProtocolShareUpdated {
        new_share: u64,
    },
    TreasuryUpdated {
        new_treasury: Address,
    },
    VolatilityParamsUpdated {
        ewma_alpha: u64,
        volatility_window: u64,
        fee_multiplier: u64,
    },
    /// `new_owner` is the zero address after renouncement
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    FeesWithdrawn {
        token: Currency,
        treasury: Address,
        amount: u128,
    },
}

impl HookEvent {
    /// Event name as indexers know it
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::DynamicFeeUpdated { .. } => "DynamicFeeUpdated",
            HookEvent::PoolInitialized { .. } => "PoolInitialized",
            HookEvent::ProtocolShareUpdated { .. } => "ProtocolShareUpdated",
            HookEvent::TreasuryUpdated { .. } => "TreasuryUpdated",
            HookEvent::VolatilityParamsUpdated { .. } => "VolatilityParamsUpdated",
            HookEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            HookEvent::FeesWithdrawn { .. } => "FeesWithdrawn",
        }
    }
}
