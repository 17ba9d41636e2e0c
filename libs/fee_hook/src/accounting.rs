//! Protocol fee accounting
//!
//! Splits each realized swap fee between liquidity providers and the
//! protocol. Only the protocol cut is tracked here: one balance per token,
//! shared by every pool and drawn down by the treasury. The LP remainder
//! stays with the host exchange's own fee distribution.

use crate::constants::BPS_DENOMINATOR;
use crate::errors::{HookError, TransferError};
use crate::types::{Address, Currency};
use ethereum_types::U256;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Moves tokens held by the hook to another account
pub trait TokenTransfer {
    fn transfer(&mut self, token: Currency, to: Address, amount: u128)
        -> Result<(), TransferError>;
}

/// Accrued protocol fees per token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolLedger {
    accrued: BTreeMap<Currency, u128>,
}

impl ProtocolLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `fee_amount * share_bps / 10_000`, rounded down
    pub fn protocol_cut(fee_amount: u128, share_bps: u64) -> u128 {
        let share = share_bps.min(BPS_DENOMINATOR);
        let cut = U256::from(fee_amount) * U256::from(share) / U256::from(BPS_DENOMINATOR);
        cut.low_u128()
    }

    pub fn accrued(&self, token: Currency) -> u128 {
        self.accrued.get(&token).copied().unwrap_or(0)
    }

    /// Tokens with a non-zero balance
    pub fn tokens(&self) -> impl Iterator<Item = (&Currency, &u128)> {
        self.accrued.iter()
    }

    /// Balance `token` would reach after adding `amount`
    pub fn checked_accrual(&self, token: Currency, amount: u128) -> Result<u128, HookError> {
        self.accrued(token)
            .checked_add(amount)
            .ok_or(HookError::ArithmeticOverflow { token })
    }

    /// Add `amount` to the balance of `token`, returning the new balance
    pub fn accrue(&mut self, token: Currency, amount: u128) -> Result<u128, HookError> {
        let balance = self.checked_accrual(token, amount)?;
        if amount > 0 {
            self.accrued.insert(token, balance);
        }
        Ok(balance)
    }

    /// Send the whole balance of `token` to `treasury`
    ///
    /// The balance is cleared only after the transfer succeeds; a failed
    /// transfer leaves it untouched. An empty balance transfers nothing.
    pub fn withdraw<T: TokenTransfer + ?Sized>(
        &mut self,
        token: Currency,
        treasury: Address,
        transfer: &mut T,
    ) -> Result<u128, HookError> {
        if treasury.is_zero() {
            return Err(HookError::ZeroAddress("treasury"));
        }

        let amount = self.accrued(token);
        if amount == 0 {
            return Ok(0);
        }

        if let Err(source) = transfer.transfer(token, treasury, amount) {
            warn!(
                "Protocol fee withdrawal failed: token={:?} amount={} error={}",
                token, amount, source
            );
            return Err(HookError::WithdrawFailed { token, source });
        }

        self.accrued.remove(&token);
        info!(
            "Protocol fees withdrawn: token={:?} amount={} treasury={:?}",
            token, amount, treasury
        );
        Ok(amount)
    }
}
