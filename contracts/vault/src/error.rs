//! # Ledger and Vault Errors
//!
//! Every fallible ledger or vault operation returns [`Result`]. Errors are
//! raised before the first mutation, so a returned error means no state
//! changed. The `#[near]` entry points turn them into panics with the
//! display text below.

use near_sdk::{env, AccountId};
use thiserror::Error;

/// Result alias used across the ledger and vault modules.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An asset or share argument was zero, or its counter-amount rounded to zero.
    #[error("Amount must be positive")]
    ZeroAmount,

    /// The receiver (or spender) is the null account.
    #[error("Account must not be the zero account")]
    ZeroAddress,

    /// Transfer or mint towards the null account.
    #[error("Invalid recipient")]
    InvalidRecipient,

    /// Burn from the null account, or a deposit paid from the vault's own custody.
    #[error("Invalid source")]
    InvalidSource,

    #[error("Insufficient balance for {account_id}: balance {balance}, required {amount}")]
    InsufficientBalance {
        account_id: AccountId,
        balance: u128,
        amount: u128,
    },

    #[error(
        "Insufficient allowance for {spender_id} on {owner_id}: allowance {allowance}, required {amount}"
    )]
    InsufficientAllowance {
        owner_id: AccountId,
        spender_id: AccountId,
        allowance: u128,
        amount: u128,
    },

    /// The asset ledger rejected a transfer; the inner error is its own.
    #[error("Asset transfer failed: {0}")]
    TransferFailed(#[source] Box<Error>),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl Error {
    /// Wraps an asset-ledger failure.
    pub fn transfer_failed(source: Error) -> Self {
        Error::TransferFailed(Box::new(source))
    }
}

/// Contract boundary: a failed call aborts the receipt with the error text.
pub(crate) trait UnwrapOrPanic<T> {
    fn unwrap_or_panic(self) -> T;
}

impl<T> UnwrapOrPanic<T> for Result<T> {
    fn unwrap_or_panic(self) -> T {
        self.unwrap_or_else(|err| env::panic_str(&err.to_string()))
    }
}
