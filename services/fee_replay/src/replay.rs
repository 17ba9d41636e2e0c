//! Apply trace steps to a hook and stream the emitted events

use crate::trace::{parse_sqrt_price, TraceStep};
use anyhow::{Context, Result};
use ethereum_types::H160;
use fee_hook::{
    Address, Currency, DynamicFeeHook, FeeCurve, HookError, HookEvent, TokenTransfer,
    TransferError,
};
use hook_config::parse_address;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Treasury transfers recorded instead of executed
#[derive(Debug, Default)]
pub struct DryRunTransfer {
    pub sent: BTreeMap<(Currency, Address), u128>,
}

impl TokenTransfer for DryRunTransfer {
    fn transfer(&mut self, token: Currency, to: Address, amount: u128) -> Result<(), TransferError> {
        let total = self.sent.entry((token, to)).or_insert(0);
        *total = total
            .checked_add(amount)
            .ok_or_else(|| TransferError::Rejected("transfer total overflow".to_string()))?;
        info!("Dry-run transfer: token={:?} to={:?} amount={}", token, to, amount);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub steps: u64,
    pub failed: u64,
    pub events: u64,
}

pub struct Replayer {
    hook: DynamicFeeHook,
    transfer: DryRunTransfer,
    owner: Address,
}

impl Replayer {
    /// Governance steps are issued as the configured owner
    pub fn new(hook: DynamicFeeHook) -> Self {
        let owner = hook.owner().unwrap_or_else(H160::zero);
        Self {
            hook,
            transfer: DryRunTransfer::default(),
            owner,
        }
    }

    pub fn hook(&self) -> &DynamicFeeHook {
        &self.hook
    }

    pub fn transfers(&self) -> &DryRunTransfer {
        &self.transfer
    }

    /// Run one step against the hook
    pub fn apply(&mut self, step: &TraceStep) -> Result<Vec<HookEvent>> {
        let manager = self.hook.pool_manager();

        let events = match step {
            TraceStep::Initialize {
                pool,
                sqrt_price_x96,
                timestamp,
            } => {
                let key = pool.to_key()?;
                let price = parse_sqrt_price(sqrt_price_x96)?;
                self.hook.after_initialize(manager, &key, price, *timestamp)?
            }
            TraceStep::Swap {
                pool,
                sqrt_price_x96,
                timestamp,
                amount_in,
                fee_token,
            } => {
                let key = pool.to_key()?;
                let price = parse_sqrt_price(sqrt_price_x96)?;
                let fee_token = parse_address(fee_token).context("Invalid fee_token")?;
                if !key.contains(fee_token) {
                    return Err(HookError::CurrencyNotInPool {
                        pool_id: key.to_id(),
                        token: fee_token,
                    }
                    .into());
                }

                let quote = self.hook.before_swap(manager, &key, price, *timestamp)?;
                let fee_amount = FeeCurve::fee_amount(*amount_in as u128, quote.fee);
                if let Err(e) = self.hook.after_swap(manager, &key, fee_token, fee_amount) {
                    // Host reverts the swap; undo the quote with it
                    self.hook.abort_swap(manager, &key)?;
                    return Err(e.into());
                }
                debug!(
                    "Swap replayed: fee={} fee_amount={} volatility={}",
                    quote.fee, fee_amount, quote.volatility
                );
                quote.events
            }
            TraceStep::Abort { pool } => {
                let key = pool.to_key()?;
                self.hook.abort_swap(manager, &key)?
            }
            TraceStep::Withdraw { token } => {
                let token = parse_address(token).context("Invalid token")?;
                self.hook
                    .withdraw_fees(self.owner, token, &mut self.transfer)?
            }
            TraceStep::SetProtocolShare { share } => {
                self.hook.set_protocol_share(self.owner, *share)?
            }
            TraceStep::SetVolatilityParams {
                ewma_alpha,
                volatility_window,
                fee_multiplier,
            } => self.hook.set_volatility_params(
                self.owner,
                *ewma_alpha,
                *volatility_window,
                *fee_multiplier,
            )?,
        };

        Ok(events)
    }

    /// Replay every non-empty line, writing each event as one JSON line
    ///
    /// A failed step is logged and counted, then replay moves on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line.context("Failed to read trace")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            summary.steps += 1;

            let result = TraceStep::parse(line).and_then(|step| {
                self.apply(&step)
                    .with_context(|| format!("{} step failed", step.op()))
            });

            match result {
                Ok(events) => {
                    for event in &events {
                        serde_json::to_writer(&mut output, event)
                            .context("Failed to write event")?;
                        writeln!(output).context("Failed to write event")?;
                    }
                    summary.events += events.len() as u64;
                }
                Err(e) => {
                    warn!("Trace line {}: {:#}", index + 1, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
