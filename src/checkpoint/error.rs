//! Checkpoint error types.

use crate::config::{join_errors, ConfigError};
use crate::controller::{InvariantViolation, MachineState};
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint version is not supported by this version
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Checkpoint carries an invalid configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("Checkpoint ledger is inconsistent: {}", join_errors(.0))]
    InvariantsViolated(Vec<InvariantViolation>),

    /// The newest history entry ends somewhere other than the ledger state
    #[error("Checkpoint history ends in {recorded} but the ledger is in {ledger}")]
    HistoryMismatch {
        recorded: MachineState,
        ledger: MachineState,
    },
}
