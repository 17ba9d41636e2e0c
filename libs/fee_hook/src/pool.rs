//! Per-pool fee state and the append-only pool registry
//!
//! Pools are permanent: the registry can add a pool once and never removes
//! one. A pool present in the registry is `Active`; an absent pool is
//! `Uninitialized`.

use crate::constants::BASE_FEE;
use crate::errors::HookError;
use crate::types::{PoolId, PoolKey};
use crate::volatility::{VolatilitySnapshot, VolatilityTracker};
use ethereum_types::U256;
use serde::Serialize;
use std::collections::HashMap;

/// Open swap on a pool, between the before-swap and after-swap callbacks
///
/// Carries the pool's state from before the quote so an abandoned swap can
/// be rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwapGuard {
    pub quoted_fee: u32,
    pub opened_at: u64,
    pub prior_volatility: VolatilitySnapshot,
    pub prior_fee: u32,
}

/// Fee and volatility state of one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolState {
    pub pool_id: PoolId,
    pub key: PoolKey,
    pub volatility: VolatilitySnapshot,
    /// Fee in force, always within `[MIN_FEE, MAX_FEE]`
    pub current_fee: u32,
    pub swap_guard: Option<SwapGuard>,
}

impl PoolState {
    pub fn new(key: PoolKey, sqrt_price_x96: U256, now: u64) -> Self {
        Self {
            pool_id: key.to_id(),
            key,
            volatility: VolatilityTracker::seed(sqrt_price_x96, now),
            current_fee: BASE_FEE,
            swap_guard: None,
        }
    }

    pub fn ewma_volatility(&self) -> u128 {
        self.volatility.ewma_volatility
    }

    pub fn is_swap_in_flight(&self) -> bool {
        self.swap_guard.is_some()
    }

    /// Close the open swap and restore the state it quoted from
    pub fn roll_back_swap(&mut self) -> Option<SwapGuard> {
        let guard = self.swap_guard.take()?;
        self.volatility = guard.prior_volatility;
        self.current_fee = guard.prior_fee;
        Some(guard)
    }
}

/// Arena of pool states keyed by pool id
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    slots: Vec<PoolState>,
    index: HashMap<PoolId, usize>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pool_id: &PoolId) -> bool {
        self.index.contains_key(pool_id)
    }

    pub fn get(&self, pool_id: &PoolId) -> Option<&PoolState> {
        self.index.get(pool_id).map(|&slot| &self.slots[slot])
    }

    /// Fails with `PoolNotInitialized` for unknown pools
    pub fn require(&self, pool_id: &PoolId) -> Result<&PoolState, HookError> {
        self.get(pool_id)
            .ok_or(HookError::PoolNotInitialized(*pool_id))
    }

    pub(crate) fn require_mut(&mut self, pool_id: &PoolId) -> Result<&mut PoolState, HookError> {
        match self.index.get(pool_id) {
            Some(&slot) => Ok(&mut self.slots[slot]),
            None => Err(HookError::PoolNotInitialized(*pool_id)),
        }
    }

    /// Add a pool; a pool id can be registered only once
    pub(crate) fn insert(&mut self, state: PoolState) -> Result<&PoolState, HookError> {
        if self.index.contains_key(&state.pool_id) {
            return Err(HookError::PoolAlreadyInitialized(state.pool_id));
        }

        let slot = self.slots.len();
        self.index.insert(state.pool_id, slot);
        self.slots.push(state);
        Ok(&self.slots[slot])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pools in initialization order
    pub fn iter(&self) -> impl Iterator<Item = &PoolState> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::H160;

    fn key(tick_spacing: i32) -> PoolKey {
        PoolKey::dynamic(
            H160::from_low_u64_be(1),
            H160::from_low_u64_be(2),
            tick_spacing,
            H160::from_low_u64_be(0xbeef),
        )
    }

    #[test]
    fn test_new_pool_starts_at_base_fee() {
        let state = PoolState::new(key(60), U256::from(1u128 << 96), 10);

        assert_eq!(state.current_fee, BASE_FEE);
        assert_eq!(state.ewma_volatility(), 0);
        assert!(!state.is_swap_in_flight());
        assert_eq!(state.pool_id, key(60).to_id());
    }

    #[test]
    fn test_roll_back_restores_pre_quote_state() {
        let mut state = PoolState::new(key(60), U256::from(1u128 << 96), 10);
        let before = state.clone();
        state.swap_guard = Some(SwapGuard {
            quoted_fee: 10_000,
            opened_at: 20,
            prior_volatility: state.volatility,
            prior_fee: state.current_fee,
        });
        state.volatility.ewma_volatility = 25_000_000;
        state.volatility.last_update = 20;
        state.current_fee = 10_000;

        assert!(state.roll_back_swap().is_some());
        assert_eq!(state, before);
        assert!(state.roll_back_swap().is_none());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = PoolRegistry::new();
        let first = PoolState::new(key(60), U256::one(), 1);
        registry.insert(first.clone()).unwrap();

        let duplicate = PoolState::new(key(60), U256::from(99u64), 2);
        assert_eq!(
            registry.insert(duplicate).map(|_| ()),
            Err(HookError::PoolAlreadyInitialized(first.pool_id))
        );
        assert_eq!(registry.get(&first.pool_id), Some(&first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = PoolRegistry::new();
        registry.insert(PoolState::new(key(10), U256::one(), 1)).unwrap();
        registry.insert(PoolState::new(key(60), U256::one(), 1)).unwrap();

        assert!(registry.contains(&key(10).to_id()));
        assert!(registry.require(&key(200).to_id()).is_err());
        assert_eq!(
            registry.iter().map(|p| p.key.tick_spacing).collect::<Vec<_>>(),
            vec![10, 60]
        );
    }
}
