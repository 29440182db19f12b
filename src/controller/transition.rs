//! Pure step functions, one per customer action.
//!
//! Each function maps the current ledger and its input to the complete
//! next ledger, the outcome, and the events to emit. Nothing is mutated
//! here; the controller commits a [`Step`] in one assignment.

use super::error::VendError;
use super::events::VendEvent;
use super::ledger::{Ledger, MachineState};
use super::outcome::{DispenseOutcome, InsertOutcome, SelectOutcome};
use crate::config::MachineConfig;

/// Fully computed effect of one action.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<O> {
    pub next: Ledger,
    pub outcome: O,
    /// Events in emission order.
    pub events: Vec<VendEvent>,
}

impl<O> Step<O> {
    fn unchanged(ledger: &Ledger, outcome: O) -> Self {
        Self {
            next: *ledger,
            outcome,
            events: Vec::new(),
        }
    }

    /// `StateChanged` goes last so that it follows the events that caused it.
    fn advance(from: &Ledger, next: Ledger, outcome: O, mut events: Vec<VendEvent>) -> Self {
        if from.state != next.state {
            events.push(VendEvent::StateChanged {
                from: from.state,
                to: next.state,
            });
        }
        Self {
            next,
            outcome,
            events,
        }
    }

    #[cfg(test)]
    fn is_noop(&self, ledger: &Ledger) -> bool {
        self.next == *ledger && self.events.is_empty()
    }
}

pub fn insert_funds(ledger: &Ledger, amount: u64) -> Result<Step<InsertOutcome>, VendError> {
    if amount == 0 {
        return Err(VendError::InvalidAmount { amount });
    }

    match ledger.state {
        MachineState::NoFunds | MachineState::HasFunds => {
            let balance = ledger
                .balance
                .checked_add(amount)
                .ok_or(VendError::BalanceOverflow {
                    balance: ledger.balance,
                    amount,
                })?;
            let next = Ledger {
                balance,
                state: MachineState::HasFunds,
                ..*ledger
            };
            Ok(Step::advance(
                ledger,
                next,
                InsertOutcome::Accepted { balance },
                Vec::new(),
            ))
        }
        MachineState::Dispensing => Ok(Step::unchanged(ledger, InsertOutcome::Busy)),
        MachineState::SoldOut => Ok(Step::unchanged(ledger, InsertOutcome::SoldOut)),
    }
}

pub fn select_product(
    ledger: &Ledger,
    config: &MachineConfig,
    requested: &str,
) -> Result<Step<SelectOutcome>, VendError> {
    if let Some(product) = &config.product {
        if product.as_str() != requested {
            return Err(VendError::UnknownProduct {
                requested: requested.to_string(),
                expected: product.to_string(),
            });
        }
    }

    let step = match ledger.state {
        MachineState::NoFunds => Step::unchanged(ledger, SelectOutcome::InsertFundsFirst),
        MachineState::HasFunds if ledger.balance < config.price => Step::unchanged(
            ledger,
            SelectOutcome::InsufficientFunds {
                shortfall: config.price - ledger.balance,
            },
        ),
        MachineState::HasFunds => {
            let change = ledger.balance - config.price;
            let events = if change > 0 {
                vec![VendEvent::ChangeReturned { amount: change }]
            } else {
                Vec::new()
            };
            let next = Ledger {
                balance: 0,
                state: MachineState::Dispensing,
                ..*ledger
            };
            Step::advance(ledger, next, SelectOutcome::Approved { change }, events)
        }
        MachineState::Dispensing => Step::unchanged(ledger, SelectOutcome::Busy),
        MachineState::SoldOut => Step::unchanged(ledger, SelectOutcome::SoldOut),
    };
    Ok(step)
}

pub fn dispense(ledger: &Ledger, config: &MachineConfig) -> Step<DispenseOutcome> {
    match ledger.state {
        MachineState::Dispensing => {
            debug_assert!(ledger.stock > 0, "dispensing with no stock");
            let remaining = ledger.stock.saturating_sub(1);
            let state = if remaining == 0 {
                MachineState::SoldOut
            } else {
                MachineState::NoFunds
            };
            let next = Ledger {
                balance: 0,
                stock: remaining,
                state,
            };
            let events = vec![VendEvent::ItemDispensed {
                product: config.product.clone(),
                remaining,
            }];
            Step::advance(
                ledger,
                next,
                DispenseOutcome::Dispensed { remaining },
                events,
            )
        }
        MachineState::NoFunds | MachineState::HasFunds => {
            Step::unchanged(ledger, DispenseOutcome::NothingToDispense)
        }
        MachineState::SoldOut => Step::unchanged(ledger, DispenseOutcome::SoldOut),
    }
}
