//! Subscriber registration and the unsubscribe handle.

use log::trace;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub(crate) type SubscriberFn = Rc<dyn Fn()>;

/// The store's subscriber list. Entries keep their registration order;
/// notification iterates a snapshot taken at dispatch time, so mutations
/// during a notification pass only affect later dispatches.
pub(crate) struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
}

struct Entry {
    id: u64,
    callback: SubscriberFn,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Registry {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn add(&mut self, callback: SubscriberFn) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, callback });
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn snapshot(&self) -> Vec<SubscriberFn> {
        self.entries
            .iter()
            .map(|entry| Rc::clone(&entry.callback))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Call [`cancel`](Subscription::cancel) to remove the callback from the
/// store. Dropping the handle without cancelling leaves the subscription
/// registered for the store's lifetime.
///
/// # Examples
///
/// ```
/// use statefold::Store;
///
/// fn keep(state: u64, _action: &&str) -> u64 {
///     state + 1
/// }
///
/// let store: Store<u64, &str> = Store::new(keep);
/// let subscription = store.subscribe(|| {});
/// subscription.cancel();
/// store.dispatch("tick").unwrap();
/// ```
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<RefCell<Registry>>) -> Self {
        Subscription { id, registry }
    }

    /// Remove the associated callback from the store.
    ///
    /// Idempotent in effect: if the store has already been dropped, this is
    /// a no-op. Cancelling from inside a subscriber is allowed — the current
    /// notification pass still runs its already-snapshotted callbacks, and
    /// the removal takes effect from the next dispatch.
    pub fn cancel(self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().remove(self.id) {
                trace!("subscriber {} removed", self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
