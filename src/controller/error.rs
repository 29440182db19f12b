//! Structural errors raised by controller actions.

use thiserror::Error;

/// Structurally invalid input to a controller action.
///
/// State-incompatible requests (selecting with no funds, inserting while
/// sold out) are not errors; they come back as ordinary outcomes. Anything
/// returned here left the controller untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VendError {
    #[error("Insert amount must be positive (got {amount})")]
    InvalidAmount { amount: u64 },

    #[error("Unknown product '{requested}', this machine sells '{expected}'")]
    UnknownProduct { requested: String, expected: String },

    #[error("Inserting {amount} would overflow the held balance of {balance}")]
    BalanceOverflow { balance: u64, amount: u64 },
}
