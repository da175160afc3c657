//! Cart Store
//!
//! The store owns the cart entries. Views hold no mutable copy; they read snapshots and register
//! observers that are called with a fresh snapshot after every effective mutation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mockall::automock;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;

use crate::{
    cart::{CartError, CartSnapshot},
    entries::{CartEntry, TemplateId, Tier},
    quantity::Quantity,
};

new_key_type! {
    /// Subscription Key
    pub struct SubscriptionKey;
}

/// Callback invoked with the new snapshot after the cart changes.
pub type SnapshotObserver = Box<dyn Fn(&CartSnapshot) + Send + Sync>;

/// Cart state store consumed by the cart page.
#[automock]
pub trait CartStore: Send + Sync {
    /// Returns the current entries.
    fn snapshot(&self) -> CartSnapshot;

    /// Returns the current total.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the total cannot be calculated.
    fn total(&self) -> Result<Money<'static, Currency>, CartError>;

    /// Adds an entry, merging quantities when the key already exists.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the entry is in another currency.
    fn add_item(&self, entry: CartEntry) -> Result<(), CartError>;

    /// Removes the entry keyed by template and tier.
    fn remove_item(&self, template: &TemplateId, tier: &Tier);

    /// Replaces the quantity of the entry keyed by template and tier.
    fn update_quantity(&self, template: &TemplateId, tier: &Tier, quantity: Quantity);

    /// Removes every entry.
    fn clear(&self);

    /// Registers an observer for snapshot changes.
    fn subscribe(&self, observer: SnapshotObserver) -> SubscriptionKey;

    /// Removes an observer. Returns false if it was not registered.
    fn unsubscribe(&self, key: SubscriptionKey) -> bool;
}

/// Process-local cart store.
pub struct InMemoryCartStore {
    snapshot: Mutex<CartSnapshot>,
    observers: Mutex<SlotMap<SubscriptionKey, Arc<SnapshotObserver>>>,
}

impl std::fmt::Debug for InMemoryCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCartStore")
            .field("snapshot", &*lock(&self.snapshot))
            .field("observers", &lock(&self.observers).len())
            .finish()
    }
}

impl InMemoryCartStore {
    /// Create an empty store in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self::from_snapshot(CartSnapshot::new(currency))
    }

    /// Create a store holding the given snapshot.
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            observers: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Apply `mutate` and notify observers if it reports a change.
    fn mutate<R>(&self, mutate: impl FnOnce(&mut CartSnapshot) -> (bool, R)) -> R {
        // Observers run after the snapshot lock is released so they may read the store.
        let (result, changed) = {
            let mut guard = lock(&self.snapshot);
            let (changed, result) = mutate(&mut guard);

            (result, changed.then(|| guard.clone()))
        };

        if let Some(snapshot) = changed {
            self.notify(&snapshot);
        }

        result
    }

    fn notify(&self, snapshot: &CartSnapshot) {
        let observers: Vec<Arc<SnapshotObserver>> =
            lock(&self.observers).values().cloned().collect();

        for observer in observers {
            observer(snapshot);
        }
    }
}

impl CartStore for InMemoryCartStore {
    fn snapshot(&self) -> CartSnapshot {
        lock(&self.snapshot).clone()
    }

    fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        lock(&self.snapshot).total()
    }

    fn add_item(&self, entry: CartEntry) -> Result<(), CartError> {
        self.mutate(|snapshot| {
            if let Some(existing) = snapshot.get_mut(&entry.template().id, entry.tier()) {
                let merged = existing.quantity().saturating_add(entry.quantity());
                let changed = merged != existing.quantity();

                existing.set_quantity(merged);

                return (changed, Ok(()));
            }

            match snapshot.push(entry) {
                Ok(()) => (true, Ok(())),
                Err(error) => (false, Err(error)),
            }
        })
    }

    fn remove_item(&self, template: &TemplateId, tier: &Tier) {
        self.mutate(|snapshot| {
            let removed = snapshot.remove(template, tier).is_some();

            if !removed {
                debug!(template = %template, tier = %tier, "remove_item: no such entry");
            }

            (removed, ())
        });
    }

    fn update_quantity(&self, template: &TemplateId, tier: &Tier, quantity: Quantity) {
        self.mutate(|snapshot| {
            let Some(entry) = snapshot.get_mut(template, tier) else {
                debug!(template = %template, tier = %tier, "update_quantity: no such entry");

                return (false, ());
            };

            let changed = entry.quantity() != quantity;

            entry.set_quantity(quantity);

            (changed, ())
        });
    }

    fn clear(&self) {
        self.mutate(|snapshot| {
            let changed = !snapshot.is_empty();

            snapshot.clear();

            (changed, ())
        });
    }

    fn subscribe(&self, observer: SnapshotObserver) -> SubscriptionKey {
        lock(&self.observers).insert(Arc::new(observer))
    }

    fn unsubscribe(&self, key: SubscriptionKey) -> bool {
        lock(&self.observers).remove(key).is_some()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
