//! The mutable triple owned by a controller, and the state tags it carries.

use crate::core::State;
use crate::state_enum;
use serde::{Deserialize, Serialize};
use std::fmt;

state_enum! {
    /// Where a machine is in the sale cycle.
    pub enum MachineState {
        /// No money held.
        NoFunds,
        /// Money held, no product selected yet.
        HasFunds,
        /// A sale was approved and the item has not been released yet.
        Dispensing,
        /// Stock is exhausted. No customer action leaves this state.
        SoldOut,
    }
    final: [SoldOut]
    transient: [Dispensing]
}

/// The customer action that triggered a transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    InsertFunds,
    SelectProduct,
    Dispense,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsertFunds => "insert_funds",
            Self::SelectProduct => "select_product",
            Self::Dispense => "dispense",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of the item a machine sells.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Balance, stock and state of a machine.
///
/// Every action computes a complete next `Ledger` before anything is
/// committed, so a controller never exposes a half-applied one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Ledger {
    /// Held funds, in the smallest currency unit.
    pub balance: u64,
    /// Units left to sell.
    pub stock: u32,
    pub state: MachineState,
}

impl Ledger {
    /// Ledger of a freshly constructed machine: nothing held, and sold out
    /// from the start when there is no stock.
    pub fn opening(stock: u32) -> Self {
        let state = if stock == 0 {
            MachineState::SoldOut
        } else {
            MachineState::NoFunds
        };
        Self {
            balance: 0,
            stock,
            state,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.state.is_final()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_ledger_with_stock_has_no_funds() {
        let ledger = Ledger::opening(3);
        assert_eq!(ledger.state, MachineState::NoFunds);
        assert_eq!(ledger.balance, 0);
        assert_eq!(ledger.stock, 3);
        assert!(!ledger.is_sold_out());
    }

    #[test]
    fn opening_ledger_without_stock_is_sold_out() {
        let ledger = Ledger::opening(0);
        assert_eq!(ledger.state, MachineState::SoldOut);
        assert!(ledger.is_sold_out());
    }

    #[test]
    fn machine_state_flags() {
        assert!(MachineState::SoldOut.is_final());
        assert!(MachineState::Dispensing.is_transient());
        assert!(!MachineState::NoFunds.is_final());
        assert!(!MachineState::HasFunds.is_transient());
        assert_eq!(MachineState::HasFunds.to_string(), "HasFunds");
    }

    #[test]
    fn product_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("Pepsi")).unwrap();
        assert_eq!(json, "\"Pepsi\"");
    }

    #[test]
    fn action_kind_uses_snake_case() {
        let json = serde_json::to_string(&ActionKind::SelectProduct).unwrap();
        assert_eq!(json, "\"select_product\"");
        assert_eq!(ActionKind::InsertFunds.to_string(), "insert_funds");
    }
}
