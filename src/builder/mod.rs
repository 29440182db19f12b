//! Builder API for ergonomic controller construction.
//!
//! This module provides a fluent builder for [`TransactionController`] and
//! the [`state_enum!`](crate::state_enum) macro used to declare state enums.
//!
//! [`TransactionController`]: crate::controller::TransactionController

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
