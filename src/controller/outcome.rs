//! Results of customer actions.
//!
//! Every variant except the accepting ones describes a request that was
//! legal input but not applicable in the current state; those leave the
//! machine unchanged.

use serde::{Deserialize, Serialize};

/// Result of [`insert_funds`](super::TransactionController::insert_funds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsertOutcome {
    /// Funds were added; `balance` is the new total held.
    Accepted { balance: u64 },
    /// A sale is being dispensed; retry after `dispense`.
    Busy,
    /// Rejected, nothing left to sell.
    SoldOut,
}

/// Result of [`select_product`](super::TransactionController::select_product).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    InsertFundsFirst,
    /// Sale approved. `change` was returned before dispensing began and is
    /// zero on exact payment.
    Approved { change: u64 },
    /// Balance is `shortfall` short of the price. Nothing changed.
    InsufficientFunds { shortfall: u64 },
    Busy,
    SoldOut,
}

/// Result of [`dispense`](super::TransactionController::dispense).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispenseOutcome {
    /// One unit released; `remaining` units are left.
    Dispensed { remaining: u32 },
    NothingToDispense,
    SoldOut,
}

impl InsertOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

impl SelectOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }
}

impl DispenseOutcome {
    pub fn is_dispensed(&self) -> bool {
        matches!(self, Self::Dispensed { .. })
    }
}
