mod action;
mod codec;
mod config;
#[cfg(feature = "emitter")]
mod emitter;
mod error;
mod movie;
mod storage;
mod store;
mod subscribers;

pub use action::{reduce, reduce_add, ActionKind, Change, MovieAction};
pub use codec::{decode as decode_movies, encode as encode_movies};
pub use config::{SeedCatalog, StoreConfig, DEFAULT_STORAGE_KEY};
#[cfg(feature = "emitter")]
pub use emitter::{EmitterBridge, MovieEventPayload};
pub use error::StoreError;
pub use movie::{default_movies, Movie, MovieId, NewMovie};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
pub use store::MovieStore;
pub use subscribers::{MovieEvent, Subscription};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
