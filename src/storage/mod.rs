//! Storage - the key/value medium a movie store persists into.
//!
//! A backend only has to read and write whole string values by key, the same
//! contract as browser `localStorage`. The store owns encoding.
//!
//! ## Example
//!
//! ```ignore
//! use movie_store::{InMemoryKeyValueStore, KeyValueStore};
//!
//! let storage = InMemoryKeyValueStore::new();
//! storage.write("movies", "[]")?;
//! assert_eq!(storage.read("movies")?.as_deref(), Some("[]"));
//! ```

mod file;
mod in_memory;

use std::path::PathBuf;

use thiserror::Error;

/// Error type for key/value storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error on key {key} ({}): {source}", .path.display())]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    /// The backend refused the write, e.g. a quota was exceeded.
    #[error("write to key {key} rejected: {reason}")]
    Rejected { key: String, reason: String },
}

/// Abstract string-keyed storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`. Returns None if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
