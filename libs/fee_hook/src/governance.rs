//! Owner-gated hook configuration
//!
//! `GlobalConfig` is the single configuration value every other component
//! reads. Each setter checks the caller first, validates its input second
//! and mutates last, so a rejected call leaves the config exactly as it was.
//!
//! Renouncing ownership is terminal: with no owner, no setter and no
//! withdrawal can ever run again.

use crate::constants::{DEFAULT_PROTOCOL_SHARE_BPS, MAX_PROTOCOL_SHARE};
use crate::errors::HookError;
use crate::events::HookEvent;
use crate::types::Address;
use crate::volatility::VolatilityParams;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    owner: Option<Address>,
    pool_manager: Address,
    treasury: Address,
    protocol_share_bps: u64,
    volatility: VolatilityParams,
}

impl GlobalConfig {
    /// Config with the default protocol share and volatility parameters
    pub fn new(owner: Address, pool_manager: Address, treasury: Address) -> Result<Self, HookError> {
        Self::with_params(
            owner,
            pool_manager,
            treasury,
            DEFAULT_PROTOCOL_SHARE_BPS,
            VolatilityParams::default(),
        )
    }

    pub fn with_params(
        owner: Address,
        pool_manager: Address,
        treasury: Address,
        protocol_share_bps: u64,
        volatility: VolatilityParams,
    ) -> Result<Self, HookError> {
        if owner.is_zero() {
            return Err(HookError::ZeroAddress("owner"));
        }
        if pool_manager.is_zero() {
            return Err(HookError::ZeroAddress("pool_manager"));
        }
        if treasury.is_zero() {
            return Err(HookError::ZeroAddress("treasury"));
        }
        validate_protocol_share(protocol_share_bps)?;
        volatility.validate()?;

        Ok(Self {
            owner: Some(owner),
            pool_manager,
            treasury,
            protocol_share_bps,
            volatility,
        })
    }

    /// `None` once ownership has been renounced
    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    pub fn pool_manager(&self) -> Address {
        self.pool_manager
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn protocol_share_bps(&self) -> u64 {
        self.protocol_share_bps
    }

    pub fn volatility_params(&self) -> VolatilityParams {
        self.volatility
    }

    pub fn is_renounced(&self) -> bool {
        self.owner.is_none()
    }

    /// Fails unless `caller` is the current owner
    pub fn only_owner(&self, caller: Address) -> Result<(), HookError> {
        match self.owner {
            Some(owner) if owner == caller => Ok(()),
            _ => {
                warn!("Rejected governance call from non-owner {:?}", caller);
                Err(HookError::NotOwner { caller })
            }
        }
    }

    /// Fails unless `caller` is the host exchange
    pub fn only_pool_manager(&self, caller: Address) -> Result<(), HookError> {
        if caller != self.pool_manager {
            warn!("Rejected pool callback from {:?}", caller);
            return Err(HookError::NotPoolManager { caller });
        }
        Ok(())
    }

    pub fn set_protocol_share(
        &mut self,
        caller: Address,
        new_share: u64,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.only_owner(caller)?;
        validate_protocol_share(new_share)?;

        self.protocol_share_bps = new_share;
        info!("Protocol share updated to {} bps", new_share);
        Ok(vec![HookEvent::ProtocolShareUpdated { new_share }])
    }

    pub fn set_treasury(
        &mut self,
        caller: Address,
        new_treasury: Address,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.only_owner(caller)?;
        if new_treasury.is_zero() {
            return Err(HookError::ZeroAddress("treasury"));
        }

        self.treasury = new_treasury;
        info!("Treasury updated to {:?}", new_treasury);
        Ok(vec![HookEvent::TreasuryUpdated { new_treasury }])
    }

    pub fn set_volatility_params(
        &mut self,
        caller: Address,
        params: VolatilityParams,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.only_owner(caller)?;
        params.validate()?;

        self.volatility = params;
        info!(
            "Volatility params updated: alpha={} window={}s multiplier={}",
            params.ewma_alpha, params.volatility_window, params.fee_multiplier
        );
        Ok(vec![HookEvent::VolatilityParamsUpdated {
            ewma_alpha: params.ewma_alpha,
            volatility_window: params.volatility_window,
            fee_multiplier: params.fee_multiplier,
        }])
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Vec<HookEvent>, HookError> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(HookError::ZeroAddress("owner"));
        }

        self.owner = Some(new_owner);
        info!("Ownership transferred from {:?} to {:?}", caller, new_owner);
        Ok(vec![HookEvent::OwnershipTransferred {
            previous_owner: caller,
            new_owner,
        }])
    }

    /// Give up ownership for good
    pub fn renounce_ownership(&mut self, caller: Address) -> Result<Vec<HookEvent>, HookError> {
        self.only_owner(caller)?;

        self.owner = None;
        warn!("Ownership renounced by {:?}; governance is now frozen", caller);
        Ok(vec![HookEvent::OwnershipTransferred {
            previous_owner: caller,
            new_owner: Address::zero(),
        }])
    }
}

fn validate_protocol_share(share: u64) -> Result<(), HookError> {
    if share > MAX_PROTOCOL_SHARE {
        return Err(HookError::InvalidProtocolShare {
            share,
            max: MAX_PROTOCOL_SHARE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethereum_types::H160;

    fn owner() -> Address {
        H160::from_low_u64_be(0x0a)
    }

    fn stranger() -> Address {
        H160::from_low_u64_be(0x0b)
    }

    fn config() -> GlobalConfig {
        GlobalConfig::new(
            owner(),
            H160::from_low_u64_be(0x0c),
            H160::from_low_u64_be(0x0d),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_zero_addresses() {
        let zero = H160::zero();
        let any = H160::from_low_u64_be(1);

        assert_eq!(
            GlobalConfig::new(zero, any, any),
            Err(HookError::ZeroAddress("owner"))
        );
        assert_eq!(
            GlobalConfig::new(any, zero, any),
            Err(HookError::ZeroAddress("pool_manager"))
        );
        assert_eq!(
            GlobalConfig::new(any, any, zero),
            Err(HookError::ZeroAddress("treasury"))
        );
    }

    #[test]
    fn test_with_params_validates_share() {
        let any = H160::from_low_u64_be(1);
        let result = GlobalConfig::with_params(
            any,
            any,
            any,
            MAX_PROTOCOL_SHARE + 1,
            VolatilityParams::default(),
        );
        assert!(matches!(
            result,
            Err(HookError::InvalidProtocolShare { .. })
        ));
    }

    #[test]
    fn test_set_protocol_share_bounds() {
        let mut config = config();

        let rejected = config.set_protocol_share(owner(), 5_001);
        assert_eq!(
            rejected,
            Err(HookError::InvalidProtocolShare {
                share: 5_001,
                max: 5_000
            })
        );
        assert_eq!(config.protocol_share_bps(), DEFAULT_PROTOCOL_SHARE_BPS);

        let events = config.set_protocol_share(owner(), 5_000).unwrap();
        assert_eq!(events, vec![HookEvent::ProtocolShareUpdated { new_share: 5_000 }]);
        assert_eq!(config.protocol_share_bps(), 5_000);
    }

    #[test]
    fn test_setters_require_owner() {
        let mut config = config();
        let before = config.clone();

        assert!(config.set_protocol_share(stranger(), 10).is_err());
        assert!(config.set_treasury(stranger(), stranger()).is_err());
        assert!(config
            .set_volatility_params(stranger(), VolatilityParams::default())
            .is_err());
        assert!(config.transfer_ownership(stranger(), stranger()).is_err());
        assert!(config.renounce_ownership(stranger()).is_err());

        assert_eq!(config, before);
    }

    #[test]
    fn test_set_treasury_rejects_zero() {
        let mut config = config();
        assert_eq!(
            config.set_treasury(owner(), H160::zero()),
            Err(HookError::ZeroAddress("treasury"))
        );

        let events = config.set_treasury(owner(), stranger()).unwrap();
        assert_eq!(events, vec![HookEvent::TreasuryUpdated { new_treasury: stranger() }]);
        assert_eq!(config.treasury(), stranger());
    }

    #[test]
    fn test_set_volatility_params_emits_all_values() {
        let mut config = config();
        let params = VolatilityParams {
            ewma_alpha: 5_000,
            volatility_window: 60,
            fee_multiplier: 120,
        };

        let events = config.set_volatility_params(owner(), params).unwrap();

        assert_eq!(
            events,
            vec![HookEvent::VolatilityParamsUpdated {
                ewma_alpha: 5_000,
                volatility_window: 60,
                fee_multiplier: 120,
            }]
        );
        assert_eq!(config.volatility_params(), params);
    }

    #[test]
    fn test_transfer_ownership() {
        let mut config = config();
        assert_eq!(
            config.transfer_ownership(owner(), H160::zero()),
            Err(HookError::ZeroAddress("owner"))
        );

        config.transfer_ownership(owner(), stranger()).unwrap();

        assert_eq!(config.owner(), Some(stranger()));
        assert!(config.set_protocol_share(owner(), 1).is_err());
        assert!(config.set_protocol_share(stranger(), 1).is_ok());
    }

    #[test]
    fn test_renounce_is_terminal() {
        let mut config = config();
        let events = config.renounce_ownership(owner()).unwrap();

        assert_eq!(
            events,
            vec![HookEvent::OwnershipTransferred {
                previous_owner: owner(),
                new_owner: H160::zero(),
            }]
        );
        assert!(config.is_renounced());
        assert_eq!(
            config.set_protocol_share(owner(), 1),
            Err(HookError::NotOwner { caller: owner() })
        );
        // Even the zero address cannot act as owner
        assert!(config.transfer_ownership(H160::zero(), owner()).is_err());
    }
}
