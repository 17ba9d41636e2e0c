//! Build a hook from deployment settings

use crate::governance::GlobalConfig;
use crate::hook::DynamicFeeHook;
use crate::volatility::VolatilityParams;
use anyhow::{Context, Result};
use hook_config::{HookSettings, VolatilitySection};
use tracing::info;

impl From<VolatilitySection> for VolatilityParams {
    fn from(section: VolatilitySection) -> Self {
        Self {
            ewma_alpha: section.ewma_alpha,
            volatility_window: section.volatility_window,
            fee_multiplier: section.fee_multiplier,
        }
    }
}

impl GlobalConfig {
    pub fn from_settings(settings: &HookSettings) -> Result<Self> {
        let config = GlobalConfig::with_params(
            settings.owner_address()?,
            settings.pool_manager_address()?,
            settings.treasury_address()?,
            settings.hook.protocol_share_bps,
            settings.volatility.into(),
        )
        .context("Invalid hook settings")?;

        Ok(config)
    }
}

impl DynamicFeeHook {
    /// Fresh hook, with no pools and nothing accrued, configured from `settings`
    pub fn from_settings(settings: &HookSettings) -> Result<Self> {
        let config = GlobalConfig::from_settings(settings)?;
        info!(
            "Dynamic fee hook configured: owner={:?} pool_manager={:?} protocol_share_bps={}",
            config.owner(),
            config.pool_manager(),
            config.protocol_share_bps()
        );
        Ok(Self::new(config))
    }
}
