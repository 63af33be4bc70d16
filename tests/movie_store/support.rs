use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use movie_store::{InMemoryKeyValueStore, KeyValueStore, MovieStore, StorageError};

pub fn seeded_store() -> MovieStore<InMemoryKeyValueStore> {
    MovieStore::open(InMemoryKeyValueStore::new()).unwrap()
}

/// Storage wrapper that counts writes and can be told to fail them.
#[derive(Clone, Default)]
pub struct RecordingStorage {
    inner: InMemoryKeyValueStore,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &InMemoryKeyValueStore {
        &self.inner
    }
}

impl KeyValueStore for RecordingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(key, value)
    }
}
