//! Checkpoint and restore for transaction controllers.
//!
//! A [`Checkpoint`] is a plain serializable value. The crate never writes
//! it anywhere; an embedder that wants persistence stores the JSON or
//! binary encoding itself and hands it back to
//! [`TransactionController::restore`](crate::controller::TransactionController::restore).

use crate::config::MachineConfig;
use crate::controller::{invariants, Ledger, MachineHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a controller.
/// Does NOT include listeners (not serializable).
///
/// # Example
///
/// ```rust
/// use vendstate::checkpoint::Checkpoint;
/// use vendstate::controller::TransactionController;
///
/// let mut machine = TransactionController::new(10000, 3).unwrap();
/// machine.insert_funds(5000).unwrap();
///
/// let json = machine.checkpoint().to_json().unwrap();
/// let restored = TransactionController::restore(Checkpoint::from_json(&json).unwrap()).unwrap();
///
/// assert_eq!(restored.ledger(), machine.ledger());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub config: MachineConfig,

    pub ledger: Ledger,

    /// Retained transition history
    pub history: MachineHistory,
}

impl Checkpoint {
    pub(crate) fn capture(
        config: &MachineConfig,
        ledger: &Ledger,
        history: &MachineHistory,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            config: config.clone(),
            ledger: *ledger,
            history: history.clone(),
        }
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Encode in the compact bincode format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Check that this checkpoint can be restored.
    ///
    /// An empty history is accepted; otherwise its newest transition must
    /// end in the ledger's state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        self.config.check().map_err(CheckpointError::InvalidConfig)?;

        let violations = invariants::violations(&self.ledger);
        if !violations.is_empty() {
            return Err(CheckpointError::InvariantsViolated(violations));
        }

        match self.history.last() {
            Some(last) if last.to != self.ledger.state => Err(CheckpointError::HistoryMismatch {
                recorded: last.to,
                ledger: self.ledger.state,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::controller::{InvariantViolation, MachineState, TransactionController};

    fn checkpoint_after_insert() -> Checkpoint {
        let mut machine = TransactionController::new(10000, 2).unwrap();
        machine.insert_funds(4000).unwrap();
        machine.checkpoint()
    }

    #[test]
    fn capture_records_current_values() {
        let checkpoint = checkpoint_after_insert();

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.ledger.balance, 4000);
        assert_eq!(checkpoint.ledger.state, MachineState::HasFunds);
        assert_eq!(checkpoint.history.len(), 1);
        assert!(checkpoint.validate().is_ok());
    }

    #[test]
    fn json_encoding_restores_equal_checkpoint() {
        let checkpoint = checkpoint_after_insert();
        let decoded = Checkpoint::from_json(&checkpoint.to_json().unwrap()).unwrap();
        assert_eq!(decoded, checkpoint);
    }

    #[test]
    fn binary_encoding_restores_equal_checkpoint() {
        let checkpoint = checkpoint_after_insert();
        let decoded = Checkpoint::from_bytes(&checkpoint.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, checkpoint);
    }

    #[test]
    fn garbage_input_fails_to_decode() {
        assert!(matches!(
            Checkpoint::from_json("{ not json"),
            Err(CheckpointError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Checkpoint::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = checkpoint_after_insert();
        checkpoint.version = CHECKPOINT_VERSION + 1;

        assert_eq!(
            checkpoint.validate(),
            Err(CheckpointError::UnsupportedVersion {
                found: CHECKPOINT_VERSION + 1,
                supported: CHECKPOINT_VERSION,
            })
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut checkpoint = checkpoint_after_insert();
        checkpoint.config.price = 0;

        assert_eq!(
            checkpoint.validate(),
            Err(CheckpointError::InvalidConfig(vec![ConfigError::ZeroPrice]))
        );
    }

    #[test]
    fn history_must_end_in_the_ledger_state() {
        let mut checkpoint = checkpoint_after_insert();
        checkpoint.ledger = Ledger {
            balance: 0,
            stock: 2,
            state: MachineState::NoFunds,
        };

        assert_eq!(
            checkpoint.validate(),
            Err(CheckpointError::HistoryMismatch {
                recorded: MachineState::HasFunds,
                ledger: MachineState::NoFunds,
            })
        );
        assert!(TransactionController::restore(checkpoint).is_err());
    }

    #[test]
    fn empty_history_accepts_any_consistent_ledger() {
        let mut checkpoint = TransactionController::new(10000, 2).unwrap().checkpoint();
        checkpoint.ledger = Ledger {
            balance: 300,
            stock: 2,
            state: MachineState::HasFunds,
        };

        assert!(checkpoint.history.is_empty());
        assert!(checkpoint.validate().is_ok());
    }

    #[test]
    fn inconsistent_ledger_is_rejected_with_all_violations() {
        let mut checkpoint = checkpoint_after_insert();
        checkpoint.ledger = Ledger {
            balance: 300,
            stock: 0,
            state: MachineState::Dispensing,
        };

        match checkpoint.validate() {
            Err(CheckpointError::InvariantsViolated(found)) => {
                assert_eq!(found.len(), 2);
                assert!(found.contains(&InvariantViolation::EmptyOutsideSoldOut {
                    state: MachineState::Dispensing
                }));
            }
            other => panic!("Expected invariant violations, got {other:?}"),
        }
    }
}
