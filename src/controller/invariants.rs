//! Ledger consistency rules.
//!
//! Uses Stillwater's `Validation` so that every broken rule is reported in
//! one pass instead of stopping at the first.

use super::ledger::{Ledger, MachineState};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A ledger rule that does not hold.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("SoldOut with {stock} units still in stock")]
    SoldOutWithStock { stock: u32 },

    #[error("{state} with no stock left")]
    EmptyOutsideSoldOut { state: MachineState },

    #[error("{state} holding a balance of {balance}")]
    BalanceOutsideHasFunds { state: MachineState, balance: u64 },

    #[error("HasFunds with a zero balance")]
    HasFundsWithoutBalance,
}

type Check = Validation<(), NonEmptyVec<InvariantViolation>>;

fn require(holds: bool, violation: impl FnOnce() -> InvariantViolation) -> Check {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Check every ledger rule, accumulating ALL violations.
///
/// - SoldOut exactly when stock is zero
/// - a balance is only ever held in HasFunds, and HasFunds always holds one
pub fn check_ledger(ledger: &Ledger) -> Check {
    let Ledger {
        balance,
        stock,
        state,
    } = *ledger;

    let checks = vec![
        require(state != MachineState::SoldOut || stock == 0, || {
            InvariantViolation::SoldOutWithStock { stock }
        }),
        require(state == MachineState::SoldOut || stock > 0, || {
            InvariantViolation::EmptyOutsideSoldOut { state }
        }),
        require(state == MachineState::HasFunds || balance == 0, || {
            InvariantViolation::BalanceOutsideHasFunds { state, balance }
        }),
        require(state != MachineState::HasFunds || balance > 0, || {
            InvariantViolation::HasFundsWithoutBalance
        }),
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// All violations of `ledger`, empty when it is consistent.
pub fn violations(ledger: &Ledger) -> Vec<InvariantViolation> {
    match check_ledger(ledger) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
