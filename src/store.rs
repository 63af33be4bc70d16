use std::sync::Arc;

use tracing::{debug, warn};

use crate::action::{self, ActionKind, Change, MovieAction};
use crate::codec;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::movie::{next_id_after, Movie, MovieId, NewMovie};
use crate::storage::KeyValueStore;
use crate::subscribers::{MovieEvent, Subscribers, Subscription};

/// The canonical movie collection.
///
/// Owns the ordered list and the id counter, and writes the list to its
/// [`KeyValueStore`] after every mutation that changes it. Each mutation
/// builds a new collection and swaps it in, so a [`snapshot`](Self::snapshot)
/// taken earlier never changes.
///
/// Mutations that change nothing (missing id or identical edit) return
/// `Ok(false)` and neither persist nor notify.
pub struct MovieStore<S: KeyValueStore> {
    storage: S,
    key: String,
    movies: Arc<[Movie]>,
    next_movie_id: MovieId,
    subscribers: Subscribers,
}

impl<S: KeyValueStore> MovieStore<S> {
    /// Open a store under the default key, seeding the built-in catalog when
    /// nothing is stored yet.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        Self::open_with(storage, StoreConfig::default())
    }

    /// Open a store with explicit options.
    ///
    /// A stored value that cannot be decoded is an error; the seed is only
    /// used when the key holds nothing. The seed is not written until the
    /// first mutation.
    pub fn open_with(storage: S, config: StoreConfig) -> Result<Self, StoreError> {
        let movies = match storage.read(&config.key)? {
            Some(value) => {
                let movies = codec::decode(&value)?;
                debug!(key = %config.key, count = movies.len(), "loaded stored movies");
                movies
            }
            None => {
                let movies = config.seed.movies();
                debug!(key = %config.key, count = movies.len(), "nothing stored, using seed catalog");
                movies
            }
        };

        let next_movie_id = next_id_after(&movies);
        Ok(MovieStore {
            storage,
            key: config.key,
            movies: movies.into(),
            next_movie_id,
            subscribers: Subscribers::new(),
        })
    }

    /// The movies in display order.
    pub fn list(&self) -> &[Movie] {
        &self.movies
    }

    /// An owned handle to the current collection value.
    pub fn snapshot(&self) -> Arc<[Movie]> {
        Arc::clone(&self.movies)
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Movies flagged as favorite, in display order.
    pub fn favorites(&self) -> Vec<Movie> {
        self.movies.iter().filter(|m| m.is_favorite).cloned().collect()
    }

    /// The id the next `add` without an explicit id will receive.
    pub fn next_movie_id(&self) -> MovieId {
        self.next_movie_id
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a movie, assigning the next id when it has none.
    ///
    /// Fails with [`StoreError::DuplicateId`] if the movie carries an id that
    /// is already taken, [`StoreError::IdSpaceExhausted`] if no id past it is
    /// left, and [`StoreError::InvalidRating`] for a non-finite rating. Nothing
    /// is changed in those cases.
    pub fn add(&mut self, movie: NewMovie) -> Result<Movie, StoreError> {
        let change = action::reduce_add(&self.movies, self.next_movie_id, movie)
            .inspect_err(|e| warn!(error = %e, "rejected movie"))?;
        self.commit(ActionKind::Added, change)
    }

    pub fn delete_by_id(&mut self, id: MovieId) -> Result<bool, StoreError> {
        self.apply(MovieAction::DeleteById(id))
    }

    /// Set the rating of a movie. Keeping ratings within 0..=10 is up to the
    /// caller; NaN and infinities fail with [`StoreError::InvalidRating`].
    pub fn rate(&mut self, id: MovieId, rating: f64) -> Result<bool, StoreError> {
        self.apply(MovieAction::Rate { id, rating })
    }

    /// Replace title and description of the movie with `movie.id`. Rating and
    /// favorite flag are left as they are.
    pub fn update(&mut self, movie: &Movie) -> Result<bool, StoreError> {
        self.apply(MovieAction::Update(movie.clone()))
    }

    pub fn toggle_favorite(&mut self, id: MovieId) -> Result<bool, StoreError> {
        self.apply(MovieAction::ToggleFavorite(id))
    }

    /// Apply any action. Returns the affected movie, or None if nothing changed.
    pub fn dispatch(&mut self, action: MovieAction) -> Result<Option<Movie>, StoreError> {
        let kind = action.kind();
        let change = action::reduce(&self.movies, self.next_movie_id, action)
            .inspect_err(|e| warn!(error = %e, "rejected movie"))?;
        match change {
            Some(change) => self.commit(kind, change).map(Some),
            None => Ok(None),
        }
    }

    /// Register a listener called synchronously after every persisted change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&MovieEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    /// Write the current list to storage.
    pub fn persist(&self) -> Result<(), StoreError> {
        let encoded = codec::encode(&self.movies)?;
        self.storage
            .write(&self.key, &encoded)
            .inspect_err(|e| warn!(key = %self.key, error = %e, "failed to persist movies"))?;
        debug!(key = %self.key, count = self.movies.len(), "persisted movies");
        Ok(())
    }

    fn apply(&mut self, action: MovieAction) -> Result<bool, StoreError> {
        self.dispatch(action).map(|movie| movie.is_some())
    }

    /// Swap in the change, persist, then notify. A failed write keeps the new
    /// state in memory and skips notification.
    fn commit(&mut self, kind: ActionKind, change: Change) -> Result<Movie, StoreError> {
        let Change {
            movies,
            next_movie_id,
            movie,
        } = change;
        self.movies = movies.into();
        self.next_movie_id = next_movie_id;

        self.persist()?;

        self.subscribers.notify(&MovieEvent {
            kind,
            movie: movie.clone(),
            movies: self.snapshot(),
        });
        Ok(movie)
    }
}
