//! Vendstate: a finite-state transaction controller for vending machines.
//!
//! The controller tracks held funds, remaining stock and sale progress
//! through four states, and decides which customer actions are legal in
//! each of them. Everything is synchronous and in-memory; presenting
//! results to a customer is left to the embedding program.
//!
//! # Core Concepts
//!
//! - **State**: `NoFunds`, `HasFunds`, `Dispensing` and `SoldOut`, a closed
//!   enum implementing the [`core::State`] trait
//! - **Actions**: `insert_funds`, `select_product` and `dispense`, each
//!   computed by a pure step function and committed atomically
//! - **Outcomes**: requests that do not apply in the current state are
//!   ordinary results, not errors
//! - **Events**: change returns, dispensed items and state changes are
//!   pushed to listeners during the call that caused them
//!
//! # Example
//!
//! ```rust
//! use vendstate::controller::{InsertOutcome, MachineState, SelectOutcome, TransactionController};
//!
//! let mut machine = TransactionController::new(10000, 2).unwrap();
//!
//! machine.insert_funds(7000).unwrap();
//! assert_eq!(
//!     machine.select_product("Pepsi").unwrap(),
//!     SelectOutcome::InsufficientFunds { shortfall: 3000 }
//! );
//!
//! assert_eq!(
//!     machine.insert_funds(3000).unwrap(),
//!     InsertOutcome::Accepted { balance: 10000 }
//! );
//! assert!(machine.select_product("Pepsi").unwrap().is_approved());
//! assert_eq!(machine.state(), MachineState::Dispensing);
//!
//! machine.dispense();
//! assert_eq!(machine.state(), MachineState::NoFunds);
//! assert_eq!(machine.stock(), 1);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod core;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{ConfigError, MachineConfig};
pub use controller::{
    DispenseOutcome, InsertOutcome, MachineState, SelectOutcome, TransactionController,
    VendError, VendEvent,
};
