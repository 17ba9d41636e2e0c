//! Addresses, pool keys and pool identifiers

use crate::constants::DYNAMIC_FEE_FLAG;
use crate::errors::HookError;
use ethereum_types::{H160, H256};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// 20-byte account address; the zero address is the null sentinel
pub type Address = H160;

/// Token identifier; the zero address is the chain's native currency
pub type Currency = H160;

/// 32-byte pool identifier derived from the pool key
pub type PoolId = H256;

/// Everything the host exchange uses to identify a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub currency0: Currency,
    pub currency1: Currency,
    /// Fee field; `DYNAMIC_FEE_FLAG` for hook-controlled pools
    pub fee: u32,
    pub tick_spacing: i32,
    pub hooks: Address,
}

impl PoolKey {
    /// Key for a hook-controlled pool, ordering the two currencies
    pub fn dynamic(a: Currency, b: Currency, tick_spacing: i32, hooks: Address) -> Self {
        let (currency0, currency1) = if a <= b { (a, b) } else { (b, a) };
        Self {
            currency0,
            currency1,
            fee: DYNAMIC_FEE_FLAG,
            tick_spacing,
            hooks,
        }
    }

    /// keccak256 over the ABI encoding of the five key fields
    pub fn to_id(&self) -> PoolId {
        let mut encoded = [0u8; 160];
        encoded[12..32].copy_from_slice(self.currency0.as_bytes());
        encoded[44..64].copy_from_slice(self.currency1.as_bytes());
        encoded[92..96].copy_from_slice(&self.fee.to_be_bytes());
        // int24 is sign-extended across its word
        if self.tick_spacing < 0 {
            encoded[96..124].fill(0xff);
        }
        encoded[124..128].copy_from_slice(&self.tick_spacing.to_be_bytes());
        encoded[140..160].copy_from_slice(self.hooks.as_bytes());

        H256::from_slice(Keccak256::digest(encoded).as_slice())
    }

    /// Reject keys the hook cannot manage
    pub fn validate(&self) -> Result<(), HookError> {
        if self.currency0 >= self.currency1 {
            return Err(HookError::CurrenciesOutOfOrder);
        }
        if self.fee != DYNAMIC_FEE_FLAG {
            return Err(HookError::NotDynamicFee { fee: self.fee });
        }
        Ok(())
    }

    pub fn contains(&self, currency: Currency) -> bool {
        self.currency0 == currency || self.currency1 == currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> PoolKey {
        PoolKey::dynamic(
            H160::from_low_u64_be(2),
            H160::from_low_u64_be(1),
            60,
            H160::from_low_u64_be(0xbeef),
        )
    }

    #[test]
    fn test_dynamic_key_orders_currencies() {
        let key = key();
        assert_eq!(key.currency0, H160::from_low_u64_be(1));
        assert_eq!(key.currency1, H160::from_low_u64_be(2));
        assert!(key.validate().is_ok());
    }

    #[test]
    fn test_pool_id_depends_on_every_field() {
        let base = key();
        let mut other_spacing = base;
        other_spacing.tick_spacing = 200;
        let mut other_hooks = base;
        other_hooks.hooks = H160::zero();

        assert_eq!(base.to_id(), key().to_id());
        assert_ne!(base.to_id(), other_spacing.to_id());
        assert_ne!(base.to_id(), other_hooks.to_id());
    }

    #[test]
    fn test_negative_tick_spacing_is_sign_extended() {
        let mut positive = key();
        positive.tick_spacing = 1;
        let mut negative = key();
        negative.tick_spacing = -1;

        assert_ne!(positive.to_id(), negative.to_id());
    }

    #[test]
    fn test_validate_rejects_static_fee_and_unsorted_keys() {
        let mut static_fee = key();
        static_fee.fee = 3_000;
        assert_eq!(
            static_fee.validate(),
            Err(HookError::NotDynamicFee { fee: 3_000 })
        );

        let mut unsorted = key();
        std::mem::swap(&mut unsorted.currency0, &mut unsorted.currency1);
        assert_eq!(unsorted.validate(), Err(HookError::CurrenciesOutOfOrder));
    }
}
