//! The vending transaction controller.
//!
//! [`TransactionController`] owns a machine's balance, stock and state and
//! exposes the three customer actions. Each action is computed by a pure
//! function in [`transition`] and then committed in one assignment, so a
//! structural error or an inapplicable request never leaves a partial
//! change behind.
//!
//! # Example
//!
//! ```rust
//! use vendstate::controller::{
//!     DispenseOutcome, InsertOutcome, MachineState, SelectOutcome, TransactionController,
//! };
//!
//! let mut machine = TransactionController::new(10000, 1).unwrap();
//!
//! assert_eq!(
//!     machine.insert_funds(12000).unwrap(),
//!     InsertOutcome::Accepted { balance: 12000 }
//! );
//! assert_eq!(
//!     machine.select_product("Pepsi").unwrap(),
//!     SelectOutcome::Approved { change: 2000 }
//! );
//! assert_eq!(machine.dispense(), DispenseOutcome::Dispensed { remaining: 0 });
//! assert_eq!(machine.state(), MachineState::SoldOut);
//! ```

mod error;
mod events;
pub mod invariants;
mod ledger;
mod outcome;
pub mod transition;

pub use error::VendError;
pub use events::{Listener, VendEvent};
pub use invariants::{check_ledger, InvariantViolation};
pub use ledger::{ActionKind, Ledger, MachineState, ProductId};
pub use outcome::{DispenseOutcome, InsertOutcome, SelectOutcome};

use crate::builder::{BuildError, MachineBuilder};
use crate::checkpoint::{Checkpoint, CheckpointError};
use crate::config::MachineConfig;
use crate::core::{State, StateHistory, StateTransition};
use chrono::Utc;
use std::fmt::Debug;
use tracing::{debug, info, warn};
use transition::Step;

/// History of state changes, tagged with the triggering action.
pub type MachineHistory = StateHistory<MachineState, ActionKind>;

/// Finite-state controller for one vending machine.
///
/// Not internally synchronized: every action takes `&mut self`. Wrap it in
/// a `Mutex` if several callers share one machine.
#[derive(Debug)]
pub struct TransactionController {
    config: MachineConfig,
    ledger: Ledger,
    history: MachineHistory,
    listeners: Vec<Listener>,
}

impl TransactionController {
    /// Create a machine selling any product at `price`.
    ///
    /// Starts in `SoldOut` when `initial_stock` is zero, `NoFunds`
    /// otherwise.
    pub fn new(price: u64, initial_stock: u32) -> Result<Self, BuildError> {
        Self::builder().price(price).stock(initial_stock).build()
    }

    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        config: MachineConfig,
        ledger: Ledger,
        history: MachineHistory,
        listeners: Vec<Listener>,
    ) -> Self {
        Self {
            config,
            ledger,
            history,
            listeners,
        }
    }

    /// Add `amount` to the held balance.
    ///
    /// Accepted in `NoFunds` and `HasFunds`; refused with an informational
    /// outcome in `Dispensing` and `SoldOut`.
    pub fn insert_funds(&mut self, amount: u64) -> Result<InsertOutcome, VendError> {
        let step = transition::insert_funds(&self.ledger, amount)
            .inspect_err(|err| self.log_rejection(ActionKind::InsertFunds, err))?;
        Ok(self.commit(ActionKind::InsertFunds, step))
    }

    /// Try to buy `product` with the held balance.
    ///
    /// On approval any overpayment is returned (as a
    /// [`VendEvent::ChangeReturned`]) before the machine enters
    /// `Dispensing`.
    pub fn select_product(&mut self, product: &str) -> Result<SelectOutcome, VendError> {
        let step = transition::select_product(&self.ledger, &self.config, product)
            .inspect_err(|err| self.log_rejection(ActionKind::SelectProduct, err))?;
        Ok(self.commit(ActionKind::SelectProduct, step))
    }

    /// Release the approved item.
    pub fn dispense(&mut self) -> DispenseOutcome {
        let step = transition::dispense(&self.ledger, &self.config);
        self.commit(ActionKind::Dispense, step)
    }

    /// Register a listener for all later events.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Funds currently held.
    pub fn balance(&self) -> u64 {
        self.ledger.balance
    }

    /// Units left to dispense.
    pub fn stock(&self) -> u32 {
        self.ledger.stock
    }

    /// Current machine state.
    pub fn state(&self) -> MachineState {
        self.ledger.state
    }

    /// Price of one unit.
    pub fn price(&self) -> u64 {
        self.config.price
    }

    /// The product id selections must match, if one is configured.
    pub fn product(&self) -> Option<&ProductId> {
        self.config.product.as_ref()
    }

    /// Balance, stock and state as one value.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Configuration the machine was built with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Retained state transitions, oldest first.
    pub fn history(&self) -> &MachineHistory {
        &self.history
    }

    /// Whether the machine has no stock left.
    pub fn is_sold_out(&self) -> bool {
        self.ledger.is_sold_out()
    }

    /// Snapshot config, ledger and history. Listeners are not included.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(&self.config, &self.ledger, &self.history)
    }

    /// Rebuild a controller from a checkpoint, without listeners.
    ///
    /// Fails if the checkpoint version is unsupported, its config is
    /// invalid, its ledger breaks any invariant, or its newest transition
    /// does not end in the ledger's state.
    pub fn restore(checkpoint: Checkpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let Checkpoint {
            id,
            config,
            ledger,
            history: saved,
            ..
        } = checkpoint;

        let mut history = StateHistory::with_limit(config.history_limit);
        for transition in saved.transitions() {
            history.push(transition.clone());
        }

        info!(
            checkpoint = %id,
            balance = ledger.balance,
            stock = ledger.stock,
            state = %ledger.state,
            "vending machine restored"
        );
        Ok(Self::from_parts(config, ledger, history, Vec::new()))
    }

    fn commit<O: Debug>(&mut self, action: ActionKind, step: Step<O>) -> O {
        let Step {
            next,
            outcome,
            events,
        } = step;
        debug_assert!(
            check_ledger(&next).is_success(),
            "{action} produced an inconsistent ledger: {next:?}"
        );

        let from = self.ledger.state;
        self.ledger = next;

        if from != next.state {
            self.history.push(StateTransition {
                from,
                to: next.state,
                trigger: action,
                timestamp: Utc::now(),
            });
            info!(%action, from = from.name(), to = next.state.name(), "state changed");
        }
        debug!(
            %action,
            ?outcome,
            balance = next.balance,
            stock = next.stock,
            state = %next.state,
            "action processed"
        );

        for event in &events {
            for listener in &self.listeners {
                listener.notify(event);
            }
        }
        outcome
    }

    fn log_rejection(&self, action: ActionKind, err: &VendError) {
        warn!(%action, state = %self.ledger.state, error = %err, "action rejected");
    }
}
