// src/surface/events.rs
//! Outward notifications after the grid changes.
//!
//! Layout or plugin code that needs to re-measure the listing subscribes
//! here instead of listening for ambient page-wide events.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Receives grid notifications. Both methods default to doing nothing.
pub trait ListingObserver: Send + Sync {
    /// Items were appended to the grid.
    fn content_changed(&self, _appended: usize, _total: usize) {}

    /// The grid's rendered size changed.
    fn viewport_resized(&self) {}
}

/// Handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct ObserverRegistry {
    next_id: AtomicU64,
    observers: RwLock<Vec<(SubscriptionId, Arc<dyn ListingObserver>)>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, observer: Arc<dyn ListingObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Broadcasts "content changed" followed by "viewport resized".
    pub(crate) fn notify_merged(&self, appended: usize, total: usize) {
        // Snapshot so observers may (un)subscribe from inside a callback.
        let observers: Vec<_> = self
            .observers
            .read()
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for observer in &observers {
            observer.content_changed(appended, total);
        }
        for observer in &observers {
            observer.viewport_resized();
        }
    }
}
