//! In-process change event hub.
//!
//! # Responsibility
//! - Keep the registry of change listeners and fan events out to them.
//!
//! # Invariants
//! - Subscription ids are unique for the hub lifetime and never reused.
//! - Emission happens outside the registry lock, so listeners may subscribe
//!   or unsubscribe from within a callback without deadlocking.

use crate::model::stock::Stock;
use crate::model::transaction::TransactionId;
use crate::model::vendor::VendorId;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Opaque handle returned by `subscribe`, used to unsubscribe.
pub type SubscriptionId = u64;

/// State change notifications delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A vendor was created.
    VendorAdded(VendorId),
    /// A ledger entry was committed for a vendor.
    TransactionRecorded {
        vendor: VendorId,
        transaction: TransactionId,
    },
    /// Global stock counters changed (ledger movement or stocktake).
    StockChanged(Stock),
}

/// Callback interface for change subscribers.
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, event: &ChangeEvent);
}

#[derive(Default)]
struct HubState {
    next_id: SubscriptionId,
    listeners: BTreeMap<SubscriptionId, Arc<dyn ChangeListener>>,
}

/// Registry of change listeners, owned by the inventory service.
#[derive(Default)]
pub struct ChangeHub {
    state: Mutex<HubState>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener and returns its subscription handle.
    pub fn subscribe(&self, listener: Arc<dyn ChangeListener>) -> SubscriptionId {
        let mut state = self.lock_state();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(id, listener);
        id
    }

    /// Removes one listener. Returns whether the handle was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock_state().listeners.remove(&id).is_some()
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock_state().listeners.len()
    }

    /// Delivers one event to every registered listener, in subscription
    /// order.
    pub fn emit(&self, event: &ChangeEvent) {
        let listeners: Vec<Arc<dyn ChangeListener>> =
            self.lock_state().listeners.values().cloned().collect();
        for listener in listeners {
            listener.on_change(event);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
