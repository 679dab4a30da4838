//! Synchronous subscriber list shared by the session and profile stores.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered list of listeners notified with a snapshot of the new state.
///
/// Listeners run on the mutating thread, in subscription order, after the
/// store has released its own lock. The list itself is snapshotted before
/// dispatch, so a listener may read the store or (un)subscribe without
/// deadlocking.
pub struct Subscribers<T> {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Listener<T>)>>,
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the id was not (or no longer) subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_notify_in_subscription_order() {
        let subscribers = Subscribers::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        subscribers.subscribe(move |v| first.lock().unwrap().push(("first", *v)));
        let second = Arc::clone(&seen);
        subscribers.subscribe(move |v| second.lock().unwrap().push(("second", *v)));

        subscribers.notify(&7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let subscribers = Subscribers::<u32>::new();
        let count = Arc::new(Mutex::new(0));

        let c = Arc::clone(&count);
        let id = subscribers.subscribe(move |_| *c.lock().unwrap() += 1);
        subscribers.notify(&1);
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        subscribers.notify(&2);

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(subscribers.is_empty());
    }
}
