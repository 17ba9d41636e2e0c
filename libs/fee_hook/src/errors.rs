//! Error types for hook callbacks, governance and fee withdrawal
//!
//! Every error aborts the operation that raised it with no state change.
//! Nothing is retried internally; the host exchange or governance client
//! decides whether to try again.

use crate::types::{Currency, PoolId};
use ethereum_types::H160;
use thiserror::Error;

/// Failure reported by the token transfer collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Errors raised by the dynamic fee hook
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    /// Governance call from an account other than the owner
    #[error("caller {caller:?} is not the owner")]
    NotOwner { caller: H160 },

    /// Pool callback from an account other than the host exchange
    #[error("caller {caller:?} is not the pool manager")]
    NotPoolManager { caller: H160 },

    /// Volatility parameter outside its allowed range
    #[error("invalid {field}: {value}")]
    InvalidFeeRange { field: &'static str, value: u64 },

    #[error("protocol share {share} bps exceeds maximum {max} bps")]
    InvalidProtocolShare { share: u64, max: u64 },

    #[error("{0} cannot be the zero address")]
    ZeroAddress(&'static str),

    #[error("price marker must be non-zero")]
    InvalidPrice,

    #[error("pool fee {fee:#x} does not carry the dynamic fee flag")]
    NotDynamicFee { fee: u32 },

    #[error("pool currencies must be sorted and distinct")]
    CurrenciesOutOfOrder,

    #[error("currency {token:?} is not traded by pool {pool_id:?}")]
    CurrencyNotInPool { pool_id: PoolId, token: Currency },

    #[error("pool {0:?} is not initialized")]
    PoolNotInitialized(PoolId),

    #[error("pool {0:?} is already initialized")]
    PoolAlreadyInitialized(PoolId),

    /// A swap callback arrived while another swap on the pool is unfinished
    #[error("swap already in flight for pool {0:?}")]
    Reentrancy(PoolId),

    #[error("no swap in flight for pool {0:?}")]
    NoSwapInFlight(PoolId),

    #[error("arithmetic overflow accruing fees in {token:?}")]
    ArithmeticOverflow { token: Currency },

    #[error("withdrawal of {token:?} failed: {source}")]
    WithdrawFailed {
        token: Currency,
        #[source]
        source: TransferError,
    },
}

/// Coarse error classes surfaced to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Validation,
    State,
    External,
}

impl HookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HookError::NotOwner { .. } | HookError::NotPoolManager { .. } => {
                ErrorKind::Authorization
            }
            HookError::InvalidFeeRange { .. }
            | HookError::InvalidProtocolShare { .. }
            | HookError::ZeroAddress(_)
            | HookError::InvalidPrice
            | HookError::NotDynamicFee { .. }
            | HookError::CurrenciesOutOfOrder
            | HookError::CurrencyNotInPool { .. } => ErrorKind::Validation,
            HookError::PoolNotInitialized(_)
            | HookError::PoolAlreadyInitialized(_)
            | HookError::Reentrancy(_)
            | HookError::NoSwapInFlight(_)
            | HookError::ArithmeticOverflow { .. } => ErrorKind::State,
            HookError::WithdrawFailed { .. } => ErrorKind::External,
        }
    }
}
