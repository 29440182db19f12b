//! Core state machine types.
//!
//! This module holds the machine-agnostic pieces:
//! - State definitions via the `State` trait
//! - Bounded, timestamped transition history
//!
//! Nothing here knows about money or stock.

mod history;
mod state;

pub use history::{StateHistory, StateTransition, Trigger, DEFAULT_HISTORY_LIMIT};
pub use state::State;
