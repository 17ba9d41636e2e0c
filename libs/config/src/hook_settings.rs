//! Hook Settings Module
//!
//! Loads deployment settings for the dynamic fee hook from a TOML file, with
//! environment variable overrides layered on top.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use ethereum_types::H160;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main hook settings structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HookSettings {
    /// Authorities and protocol share
    pub hook: HookSection,

    /// Volatility estimator parameters
    #[serde(default)]
    pub volatility: VolatilitySection,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Authority addresses and the protocol share
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HookSection {
    /// Governance owner (hex address)
    pub owner: String,
    /// Destination of protocol fee withdrawals (hex address)
    pub treasury: String,
    /// Host exchange contract allowed to drive the pool callbacks (hex address)
    pub pool_manager: String,
    #[serde(default = "default_protocol_share_bps")]
    pub protocol_share_bps: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct VolatilitySection {
    pub ewma_alpha: u64,
    pub volatility_window: u64,
    pub fee_multiplier: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_protocol_share_bps() -> u64 {
    defaults::PROTOCOL_SHARE_BPS
}

impl Default for VolatilitySection {
    fn default() -> Self {
        Self {
            ewma_alpha: defaults::volatility::EWMA_ALPHA,
            volatility_window: defaults::volatility::VOLATILITY_WINDOW_SECS,
            fee_multiplier: defaults::volatility::FEE_MULTIPLIER,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl HookSettings {
    /// Load settings from a file with `FEE_HOOK_` environment overrides
    ///
    /// Nested keys use a double underscore, e.g. `FEE_HOOK_HOOK__PROTOCOL_SHARE_BPS=2500`.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_prefix(path, defaults::ENV_PREFIX)
    }

    /// Load settings from a file with overrides read from `<prefix>_` variables
    pub fn load_with_prefix(path: &Path, env_prefix: &str) -> Result<Self> {
        info!("Loading hook settings: {:?}", path);

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build hook settings")?;

        let settings: HookSettings = config
            .try_deserialize()
            .context("Failed to deserialize hook settings")?;

        debug!(
            "Hook settings loaded: protocol_share_bps={} ewma_alpha={} window={}s multiplier={}",
            settings.hook.protocol_share_bps,
            settings.volatility.ewma_alpha,
            settings.volatility.volatility_window,
            settings.volatility.fee_multiplier
        );

        Ok(settings)
    }

    pub fn owner_address(&self) -> Result<H160> {
        parse_address(&self.hook.owner).context("Invalid hook.owner")
    }

    pub fn treasury_address(&self) -> Result<H160> {
        parse_address(&self.hook.treasury).context("Invalid hook.treasury")
    }

    pub fn pool_manager_address(&self) -> Result<H160> {
        parse_address(&self.hook.pool_manager).context("Invalid hook.pool_manager")
    }

    /// Render settings back to TOML, e.g. to write a starter file
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize hook settings")
    }
}

/// Parse a 20-byte hex address, with or without the `0x` prefix
pub fn parse_address(value: &str) -> Result<H160> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(digits).with_context(|| format!("'{}' is not hex", value))?;
    if bytes.len() != 20 {
        bail!("'{}' is {} bytes, expected 20", value, bytes.len());
    }

    Ok(H160::from_slice(&bytes))
}
