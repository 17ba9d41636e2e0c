//! Dynamic fee hook: host callbacks, queries and governance entry points
//!
//! Per swap, data flows one way:
//!
//! ```text
//! before_swap → VolatilityTracker::update → FeeCurve::compute_fee → PoolState
//!      ↓                                                               ↓
//!   SwapQuote (fee | override flag)                     DynamicFeeUpdated event
//!
//! after_swap(realized fee) → ProtocolLedger::accrue (protocol cut per token)
//! ```
//!
//! Every command checks the caller, validates, and only then commits, so a
//! failed command leaves no trace. A per-pool swap guard spans the
//! before/after pair and rejects a second swap on the same pool until the
//! first one is settled or aborted.

use crate::accounting::{ProtocolLedger, TokenTransfer};
use crate::errors::HookError;
use crate::events::HookEvent;
use crate::fee_curve::FeeCurve;
use crate::governance::GlobalConfig;
use crate::pool::{PoolRegistry, PoolState, SwapGuard};
use crate::types::{Address, Currency, PoolId, PoolKey};
use crate::volatility::{VolatilityParams, VolatilityTracker};
use ethereum_types::U256;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Fee decision handed back to the host by `before_swap`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub pool_id: PoolId,
    /// Fee in force for this swap, in pips
    pub fee: u32,
    /// `fee` with the override flag set, as the host expects it
    pub lp_fee_override: u32,
    pub volatility: u128,
    pub events: Vec<HookEvent>,
}

/// Host callbacks the hook subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HookPermissions {
    pub before_initialize: bool,
    pub after_initialize: bool,
    pub before_add_liquidity: bool,
    pub after_add_liquidity: bool,
    pub before_remove_liquidity: bool,
    pub after_remove_liquidity: bool,
    pub before_swap: bool,
    pub after_swap: bool,
    pub before_donate: bool,
    pub after_donate: bool,
    pub before_swap_return_delta: bool,
    pub after_swap_return_delta: bool,
    pub after_add_liquidity_return_delta: bool,
    pub after_remove_liquidity_return_delta: bool,
}

/// Fee-control engine driven by the host exchange
#[derive(Debug, Clone)]
pub struct DynamicFeeHook {
    config: GlobalConfig,
    pools: PoolRegistry,
    ledger: ProtocolLedger,
}

impl DynamicFeeHook {
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            pools: PoolRegistry::new(),
            ledger: ProtocolLedger::new(),
        }
    }

    pub fn hook_permissions() -> HookPermissions {
        HookPermissions {
            after_initialize: true,
            before_swap: true,
            after_swap: true,
            ..HookPermissions::default()
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /* ------------------------------- Queries -------------------------------- */

    pub fn get_current_fee(&self, pool_id: &PoolId) -> Result<u32, HookError> {
        Ok(self.pools.require(pool_id)?.current_fee)
    }

    pub fn get_pool_volatility(&self, pool_id: &PoolId) -> Result<u128, HookError> {
        Ok(self.pools.require(pool_id)?.ewma_volatility())
    }

    pub fn protocol_share_bps(&self) -> u64 {
        self.config.protocol_share_bps()
    }

    pub fn treasury(&self) -> Address {
        self.config.treasury()
    }

    pub fn volatility_params(&self) -> VolatilityParams {
        self.config.volatility_params()
    }

    pub fn owner(&self) -> Option<Address> {
        self.config.owner()
    }

    pub fn pool_manager(&self) -> Address {
        self.config.pool_manager()
    }

    pub fn accrued_protocol_fees(&self, token: Currency) -> u128 {
        self.ledger.accrued(token)
    }

    pub fn ledger(&self) -> &ProtocolLedger {
        &self.ledger
    }

    pub fn pool_state(&self, pool_id: &PoolId) -> Option<&PoolState> {
        self.pools.get(pool_id)
    }

    pub fn is_initialized(&self, pool_id: &PoolId) -> bool {
        self.pools.contains(pool_id)
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn pools(&self) -> impl Iterator<Item = &PoolState> {
        self.pools.iter()
    }

    /// Fee the next swap would get at `sqrt_price_x96` and `now`, without
    /// changing any state
    pub fn preview_fee(
        &self,
        pool_id: &PoolId,
        sqrt_price_x96: U256,
        now: u64,
    ) -> Result<u32, HookError> {
        let state = self.pools.require(pool_id)?;
        let params = self.config.volatility_params();
        let snapshot = VolatilityTracker::update(&state.volatility, sqrt_price_x96, now, &params);
        Ok(FeeCurve::compute_fee(snapshot.ewma_volatility, params.fee_multiplier))
    }

    /* ---------------------------- Host callbacks ----------------------------- */

    /// Register a newly created pool at its opening price
    pub fn after_initialize(
        &mut self,
        caller: Address,
        key: &PoolKey,
        sqrt_price_x96: U256,
        now: u64,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.only_pool_manager(caller)?;
        key.validate()?;
        if sqrt_price_x96.is_zero() {
            return Err(HookError::InvalidPrice);
        }

        let state = self.pools.insert(PoolState::new(*key, sqrt_price_x96, now))?;
        info!(
            "Pool initialized: pool_id={:?} sqrt_price_x96={} fee={}",
            state.pool_id, sqrt_price_x96, state.current_fee
        );

        Ok(vec![HookEvent::PoolInitialized {
            pool_id: state.pool_id,
            sqrt_price_x96,
        }])
    }

    /// Update volatility from the pool's current price and quote the swap fee
    pub fn before_swap(
        &mut self,
        caller: Address,
        key: &PoolKey,
        sqrt_price_x96: U256,
        now: u64,
    ) -> Result<SwapQuote, HookError> {
        self.config.only_pool_manager(caller)?;
        let pool_id = key.to_id();
        let params = self.config.volatility_params();
        let state = self.pools.require_mut(&pool_id)?;

        if state.is_swap_in_flight() {
            warn!("Rejected re-entrant swap on pool {:?}", pool_id);
            return Err(HookError::Reentrancy(pool_id));
        }
        if sqrt_price_x96.is_zero() {
            return Err(HookError::InvalidPrice);
        }

        let snapshot = VolatilityTracker::update(&state.volatility, sqrt_price_x96, now, &params);
        let fee = FeeCurve::compute_fee(snapshot.ewma_volatility, params.fee_multiplier);

        state.swap_guard = Some(SwapGuard {
            quoted_fee: fee,
            opened_at: now,
            prior_volatility: state.volatility,
            prior_fee: state.current_fee,
        });
        state.volatility = snapshot;
        state.current_fee = fee;

        debug!(
            "Dynamic fee updated: pool_id={:?} fee={} volatility={}",
            pool_id, fee, snapshot.ewma_volatility
        );

        Ok(SwapQuote {
            pool_id,
            fee,
            lp_fee_override: FeeCurve::with_override_flag(fee),
            volatility: snapshot.ewma_volatility,
            events: vec![HookEvent::DynamicFeeUpdated {
                pool_id,
                dynamic_fee: fee,
                volatility: snapshot.ewma_volatility,
            }],
        })
    }

    /// Settle the open swap: accrue the protocol cut of the realized fee
    pub fn after_swap(
        &mut self,
        caller: Address,
        key: &PoolKey,
        fee_token: Currency,
        fee_amount: u128,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.only_pool_manager(caller)?;
        let pool_id = key.to_id();
        let share = self.config.protocol_share_bps();
        let state = self.pools.require_mut(&pool_id)?;

        if !state.is_swap_in_flight() {
            return Err(HookError::NoSwapInFlight(pool_id));
        }
        if !state.key.contains(fee_token) {
            return Err(HookError::CurrencyNotInPool {
                pool_id,
                token: fee_token,
            });
        }

        let cut = ProtocolLedger::protocol_cut(fee_amount, share);
        let balance = self.ledger.accrue(fee_token, cut)?;
        state.swap_guard = None;

        debug!(
            "Swap settled: pool_id={:?} fee_amount={} protocol_cut={} accrued={}",
            pool_id, fee_amount, cut, balance
        );
        Ok(Vec::new())
    }

    /// Roll back a swap the host abandoned before settlement
    ///
    /// Volatility and fee return to their values before `before_swap`, so the
    /// abandoned quote leaves no trace. No-op when no swap is open.
    pub fn abort_swap(&mut self, caller: Address, key: &PoolKey) -> Result<Vec<HookEvent>, HookError> {
        self.config.only_pool_manager(caller)?;
        let pool_id = key.to_id();
        let state = self.pools.require_mut(&pool_id)?;

        if let Some(guard) = state.roll_back_swap() {
            debug!(
                "Swap aborted on pool {:?}: quoted fee {} rolled back to {}",
                pool_id, guard.quoted_fee, guard.prior_fee
            );
        }
        Ok(Vec::new())
    }

    /* ------------------------------ Governance ------------------------------ */

    pub fn set_protocol_share(
        &mut self,
        caller: Address,
        new_share: u64,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.set_protocol_share(caller, new_share)
    }

    pub fn set_treasury(
        &mut self,
        caller: Address,
        new_treasury: Address,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.set_treasury(caller, new_treasury)
    }

    pub fn set_volatility_params(
        &mut self,
        caller: Address,
        ewma_alpha: u64,
        volatility_window: u64,
        fee_multiplier: u64,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.set_volatility_params(
            caller,
            VolatilityParams {
                ewma_alpha,
                volatility_window,
                fee_multiplier,
            },
        )
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.transfer_ownership(caller, new_owner)
    }

    pub fn renounce_ownership(&mut self, caller: Address) -> Result<Vec<HookEvent>, HookError> {
        self.config.renounce_ownership(caller)
    }

    /// Send all accrued protocol fees in `token` to the treasury
    pub fn withdraw_fees<T: TokenTransfer + ?Sized>(
        &mut self,
        caller: Address,
        token: Currency,
        transfer: &mut T,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.config.only_owner(caller)?;
        let treasury = self.config.treasury();

        let amount = self.ledger.withdraw(token, treasury, transfer)?;
        if amount == 0 {
            return Ok(Vec::new());
        }

        Ok(vec![HookEvent::FeesWithdrawn {
            token,
            treasury,
            amount,
        }])
    }
}
