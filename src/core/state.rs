//! Core State trait for machine states.
//!
//! All controller states implement this trait, which provides pure
//! methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for machine states.
///
/// All methods are pure. States are plain values describing where the
/// machine currently is; they carry no behavior of their own.
///
/// # Required Traits
///
/// - `Copy`: States are small tags and are recorded by value in history
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States are part of checkpoints
///
/// # Example
///
/// ```rust
/// use vendstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Opening,
///     Locked,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Opening => "Opening",
///             Self::Locked => "Locked",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Locked)
///     }
///
///     fn is_transient(&self) -> bool {
///         matches!(self, Self::Opening)
///     }
/// }
///
/// assert!(DoorState::Locked.is_final());
/// assert!(DoorState::Opening.is_transient());
/// ```
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this is a final (terminal) state.
    ///
    /// No customer action leaves a final state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this state must be resolved before any other input is
    /// accepted.
    ///
    /// Default implementation returns `false`.
    fn is_transient(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Busy,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &'static str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
                Self::Done => "Done",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }

        fn is_transient(&self) -> bool {
            matches!(self, Self::Busy)
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
    struct Plain;

    impl State for Plain {
        fn name(&self) -> &'static str {
            "Plain"
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Busy.name(), "Busy");
        assert_eq!(TestState::Done.name(), "Done");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Idle.is_final());
        assert!(!TestState::Busy.is_final());
        assert!(TestState::Done.is_final());
    }

    #[test]
    fn is_transient_identifies_in_flight_states() {
        assert!(!TestState::Idle.is_transient());
        assert!(TestState::Busy.is_transient());
        assert!(!TestState::Done.is_transient());
    }

    #[test]
    fn defaults_are_neither_final_nor_transient() {
        assert!(!Plain.is_final());
        assert!(!Plain.is_transient());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&TestState::Busy).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TestState::Busy);
    }
}
