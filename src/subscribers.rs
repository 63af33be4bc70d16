use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::action::ActionKind;
use crate::movie::Movie;

/// Notification delivered to subscribers after a change has been persisted.
#[derive(Clone, Debug)]
pub struct MovieEvent {
    pub kind: ActionKind,
    /// The affected movie; for deletes, the movie that was removed.
    pub movie: Movie,
    /// The whole collection after the change.
    pub movies: Arc<[Movie]>,
}

type Listener = Arc<dyn Fn(&MovieEvent) + Send + Sync>;
type Listeners = RwLock<Vec<(u64, Listener)>>;

/// Synchronous listener registry.
#[derive(Default)]
pub(crate) struct Subscribers {
    listeners: Arc<Listeners>,
    next_id: AtomicU64,
}

impl Subscribers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&MovieEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        // A poisoned registry still holds valid listeners.
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        listeners.push((id, Arc::new(listener)));

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Call every listener in subscription order. The registry is not locked
    /// while listeners run, so a listener may subscribe or unsubscribe.
    pub(crate) fn notify(&self, event: &MovieEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners
            .read()
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }
}

/// Handle returned by [`MovieStore::subscribe`](crate::MovieStore::subscribe).
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
#[derive(Debug)]
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Remove the listener. Returns false if the store is gone or the
    /// listener was already removed.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = listeners.write().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != self.id);
        listeners.len() != before
    }
}
