use std::sync::{Arc, Mutex};

use event_emitter_rs::EventEmitter;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::action::ActionKind;
use crate::movie::Movie;
use crate::storage::KeyValueStore;
use crate::store::MovieStore;
use crate::subscribers::Subscription;

/// JSON payload published for every change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieEventPayload {
    pub kind: ActionKind,
    pub movie: Movie,
}

/// Republishes store changes on an [`EventEmitter`] by event name
/// (`"MovieAdded"`, `"MovieRated"`, ...) with a JSON payload.
///
/// The emitter runs its listeners on their own threads, so delivery here is
/// asynchronous, unlike [`MovieStore::subscribe`].
#[derive(Clone)]
pub struct EmitterBridge {
    emitter: Arc<Mutex<EventEmitter>>,
}

impl Default for EmitterBridge {
    fn default() -> Self {
        Self::new(EventEmitter::new())
    }
}

impl EmitterBridge {
    pub fn new(emitter: EventEmitter) -> Self {
        EmitterBridge {
            emitter: Arc::new(Mutex::new(emitter)),
        }
    }

    /// Listen for one event name. Returns the listener id, or None if the
    /// emitter lock is poisoned.
    pub fn on<F>(&self, event: &str, listener: F) -> Option<String>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self.emitter.lock().ok()?;
        Some(emitter.on(event, listener))
    }

    pub fn remove_listener(&self, listener_id: &str) -> bool {
        match self.emitter.lock() {
            Ok(mut emitter) => emitter.remove_listener(listener_id).is_some(),
            Err(_) => false,
        }
    }

    /// Start forwarding the store's changes.
    pub fn attach<S: KeyValueStore>(&self, store: &MovieStore<S>) -> Subscription {
        let emitter = Arc::clone(&self.emitter);
        store.subscribe(move |event| {
            let payload = MovieEventPayload {
                kind: event.kind,
                movie: event.movie.clone(),
            };
            let payload = match serde_json::to_string(&payload) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(error = %e, "failed to encode movie event");
                    return;
                }
            };
            match emitter.lock() {
                Ok(mut emitter) => {
                    emitter.emit(event.kind.event_name(), payload);
                }
                Err(_) => warn!("movie event emitter lock poisoned"),
            }
        })
    }
}
