//! JSON-lines trace format
//!
//! One host action per line, tagged by `op`:
//!
//! ```text
//! {"op":"initialize","pool":{"currency0":"0x..","currency1":"0x..","tick_spacing":60},"sqrt_price_x96":"79228162514264337593543950336","timestamp":1700000000}
//! {"op":"swap","pool":{...},"sqrt_price_x96":"...","timestamp":1700000012,"amount_in":1000000,"fee_token":"0x.."}
//! {"op":"withdraw","token":"0x.."}
//! ```
//!
//! Prices are decimal strings since they exceed JSON's safe integer range.

use anyhow::{Context, Result};
use ethereum_types::{H160, U256};
use fee_hook::PoolKey;
use hook_config::parse_address;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolSpec {
    pub currency0: String,
    pub currency1: String,
    pub tick_spacing: i32,
    /// Hook contract address in the pool key, zero when omitted
    #[serde(default)]
    pub hooks: Option<String>,
}

impl PoolSpec {
    /// Dynamic-fee pool key; currencies are sorted
    pub fn to_key(&self) -> Result<PoolKey> {
        let currency0 = parse_address(&self.currency0).context("Invalid pool.currency0")?;
        let currency1 = parse_address(&self.currency1).context("Invalid pool.currency1")?;
        let hooks = match &self.hooks {
            Some(hooks) => parse_address(hooks).context("Invalid pool.hooks")?,
            None => H160::zero(),
        };
        Ok(PoolKey::dynamic(currency0, currency1, self.tick_spacing, hooks))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TraceStep {
    Initialize {
        pool: PoolSpec,
        sqrt_price_x96: String,
        timestamp: u64,
    },
    Swap {
        pool: PoolSpec,
        sqrt_price_x96: String,
        timestamp: u64,
        amount_in: u64,
        fee_token: String,
    },
    /// Swap callback the host abandoned before settlement
    Abort { pool: PoolSpec },
    Withdraw { token: String },
    SetProtocolShare { share: u64 },
    SetVolatilityParams {
        ewma_alpha: u64,
        volatility_window: u64,
        fee_multiplier: u64,
    },
}

impl TraceStep {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).context("Malformed trace step")
    }

    pub fn op(&self) -> &'static str {
        match self {
            TraceStep::Initialize { .. } => "initialize",
            TraceStep::Swap { .. } => "swap",
            TraceStep::Abort { .. } => "abort",
            TraceStep::Withdraw { .. } => "withdraw",
            TraceStep::SetProtocolShare { .. } => "set_protocol_share",
            TraceStep::SetVolatilityParams { .. } => "set_volatility_params",
        }
    }
}

pub fn parse_sqrt_price(value: &str) -> Result<U256> {
    U256::from_dec_str(value.trim())
        .map_err(|e| anyhow::anyhow!("Invalid sqrt_price_x96 '{}': {:?}", value, e))
}
