use thiserror::Error;

use crate::movie::MovieId;
use crate::storage::StorageError;

/// Errors surfaced by [`MovieStore`](crate::MovieStore) operations.
///
/// A mutation that changes nothing (missing id or identical edit) is not an
/// error; the mutators report it by returning `false`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("movie with id {0} already exists")]
    DuplicateId(MovieId),
    #[error("no movie ids left to assign")]
    IdSpaceExhausted,
    #[error("rating must be a finite number, got {0}")]
    InvalidRating(f64),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("movie list codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the in-memory state already reflects the mutation but the
    /// write to the medium failed.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, StoreError::Storage(_))
    }
}
