//! Synchronous notifications emitted while an action runs.
//!
//! Events are produced by the pure step functions as data and handed to
//! every registered [`Listener`] before the action returns. Nothing is
//! queued.

use super::ledger::{MachineState, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something observable that happened during an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VendEvent {
    /// The machine moved to a different state.
    StateChanged {
        from: MachineState,
        to: MachineState,
    },
    /// Overpayment handed back to the customer at approval time.
    ChangeReturned { amount: u64 },
    /// One unit left the machine.
    ItemDispensed {
        product: Option<ProductId>,
        remaining: u32,
    },
}

/// Callback invoked for each [`VendEvent`].
///
/// # Example
///
/// ```rust
/// use vendstate::controller::{Listener, VendEvent};
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// let returned = Arc::new(AtomicU64::new(0));
/// let sink = Arc::clone(&returned);
/// let listener = Listener::new(move |event: &VendEvent| {
///     if let VendEvent::ChangeReturned { amount } = event {
///         sink.fetch_add(*amount, Ordering::SeqCst);
///     }
/// });
///
/// listener.notify(&VendEvent::ChangeReturned { amount: 2000 });
/// assert_eq!(returned.load(Ordering::SeqCst), 2000);
/// ```
pub struct Listener {
    callback: Box<dyn Fn(&VendEvent) + Send + Sync>,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&VendEvent) + Send + Sync + 'static,
    {
        Listener {
            callback: Box::new(callback),
        }
    }

    pub fn notify(&self, event: &VendEvent) {
        (self.callback)(event)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn listener_receives_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = Listener::new(move |e: &VendEvent| sink.lock().unwrap().push(e.clone()));

        listener.notify(&VendEvent::ChangeReturned { amount: 5 });
        listener.notify(&VendEvent::StateChanged {
            from: MachineState::HasFunds,
            to: MachineState::Dispensing,
        });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], VendEvent::ChangeReturned { amount: 5 });
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(VendEvent::ItemDispensed {
            product: Some(ProductId::new("Pepsi")),
            remaining: 3,
        })
        .unwrap();

        assert_eq!(json["event"], "item_dispensed");
        assert_eq!(json["product"], "Pepsi");
        assert_eq!(json["remaining"], 3);
    }
}
