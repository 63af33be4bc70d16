//! Actions - the store's mutations as values, and the pure reducer that applies them.
//!
//! [`reduce`] never touches its input: it builds a new owned collection for
//! the store to swap in, or reports that nothing changed.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::movie::{Movie, MovieId, NewMovie};

/// A mutation request against the movie collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum MovieAction {
    Add(NewMovie),
    DeleteById(MovieId),
    Rate { id: MovieId, rating: f64 },
    /// Replaces title and description of the movie with the same id.
    Update(Movie),
    ToggleFavorite(MovieId),
}

impl MovieAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            MovieAction::Add(_) => ActionKind::Added,
            MovieAction::DeleteById(_) => ActionKind::Deleted,
            MovieAction::Rate { .. } => ActionKind::Rated,
            MovieAction::Update(_) => ActionKind::Updated,
            MovieAction::ToggleFavorite(_) => ActionKind::FavoriteToggled,
        }
    }
}

/// Which kind of mutation produced a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Added,
    Deleted,
    Rated,
    Updated,
    FavoriteToggled,
}

impl ActionKind {
    /// Event name used when a change is published by name.
    pub fn event_name(&self) -> &'static str {
        match self {
            ActionKind::Added => "MovieAdded",
            ActionKind::Deleted => "MovieDeleted",
            ActionKind::Rated => "MovieRated",
            ActionKind::Updated => "MovieUpdated",
            ActionKind::FavoriteToggled => "MovieFavoriteToggled",
        }
    }
}

/// A change produced by reducing an action: the collection and counter to
/// swap in, and the movie it touched.
#[derive(Clone, Debug, PartialEq)]
pub struct Change {
    pub movies: Vec<Movie>,
    pub next_movie_id: MovieId,
    /// The movie after the edit; for deletes, the movie that was removed.
    pub movie: Movie,
}

/// Apply `action` to `movies`. Returns `None` when no movie matched or the
/// edit left it as it was.
pub fn reduce(
    movies: &[Movie],
    next_movie_id: MovieId,
    action: MovieAction,
) -> Result<Option<Change>, StoreError> {
    let change = match action {
        MovieAction::Add(new_movie) => return reduce_add(movies, next_movie_id, new_movie).map(Some),
        MovieAction::DeleteById(id) => {
            let Some(index) = movies.iter().position(|m| m.id == id) else {
                return Ok(None);
            };
            Some(Change {
                movies: movies.iter().filter(|m| m.id != id).cloned().collect(),
                next_movie_id,
                movie: movies[index].clone(),
            })
        }
        MovieAction::Rate { id, rating } => {
            check_rating(rating)?;
            edit(movies, next_movie_id, id, |m| m.rating = rating)
        }
        MovieAction::Update(updated) => edit(movies, next_movie_id, updated.id, |m| {
            m.title = updated.title.clone();
            m.description = updated.description.clone();
        }),
        MovieAction::ToggleFavorite(id) => {
            edit(movies, next_movie_id, id, |m| m.is_favorite = !m.is_favorite)
        }
    };

    Ok(change)
}

/// Append `new_movie`, assigning the counter when it carries no id.
///
/// An id that is already present fails with [`StoreError::DuplicateId`]. An
/// explicit id that is free is accepted and raises the counter past it.
/// `MovieId::MAX` is never issued, since the counter could not move past it.
pub fn reduce_add(
    movies: &[Movie],
    next_movie_id: MovieId,
    new_movie: NewMovie,
) -> Result<Change, StoreError> {
    check_rating(new_movie.rating)?;

    let (id, next_movie_id) = match new_movie.id {
        None => {
            let next = next_movie_id
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted)?;
            (next_movie_id, next)
        }
        Some(id) if movies.iter().any(|m| m.id == id) => {
            return Err(StoreError::DuplicateId(id));
        }
        Some(id) => {
            let after = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;
            (id, next_movie_id.max(after))
        }
    };

    let movie = new_movie.into_movie(id);
    let mut next = Vec::with_capacity(movies.len() + 1);
    next.extend_from_slice(movies);
    next.push(movie.clone());

    Ok(Change {
        movies: next,
        next_movie_id,
        movie,
    })
}

/// Non-finite ratings would be stored as `null` and could not be read back.
fn check_rating(rating: f64) -> Result<(), StoreError> {
    if rating.is_finite() {
        Ok(())
    } else {
        Err(StoreError::InvalidRating(rating))
    }
}

fn edit<F>(movies: &[Movie], next_movie_id: MovieId, id: MovieId, apply: F) -> Option<Change>
where
    F: FnOnce(&mut Movie),
{
    let index = movies.iter().position(|m| m.id == id)?;

    let mut edited = movies[index].clone();
    apply(&mut edited);
    if edited == movies[index] {
        return None;
    }

    let mut next = movies.to_vec();
    next[index] = edited.clone();
    Some(Change {
        movies: next,
        next_movie_id,
        movie: edited,
    })
}
