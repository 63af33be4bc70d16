use serde::{Deserialize, Serialize};

/// Identifier of a movie within a single store.
pub type MovieId = u64;

/// A catalog record.
///
/// Serialized with camelCase field names (`isFavorite`) so stored values stay
/// readable by anything else sharing the medium.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    /// Callers keep this within 0..=10; the store only rejects non-finite values.
    pub rating: f64,
    pub is_favorite: bool,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        description: impl Into<String>,
        rating: f64,
    ) -> Self {
        Movie {
            id,
            title: title.into(),
            description: description.into(),
            rating,
            is_favorite: false,
        }
    }
}

/// A movie that has not been added yet. The store assigns `id` when it is `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    pub title: String,
    pub description: String,
    pub rating: f64,
    #[serde(default)]
    pub is_favorite: bool,
}

impl NewMovie {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        NewMovie {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: MovieId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub(crate) fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            rating: self.rating,
            is_favorite: self.is_favorite,
        }
    }
}

impl From<Movie> for NewMovie {
    fn from(movie: Movie) -> Self {
        NewMovie {
            id: Some(movie.id),
            title: movie.title,
            description: movie.description,
            rating: movie.rating,
            is_favorite: movie.is_favorite,
        }
    }
}

/// The five movies a store starts with when nothing has been persisted yet.
pub fn default_movies() -> Vec<Movie> {
    vec![
        Movie::new(1, "Inception", "A mind-bending thriller", 8.8),
        Movie::new(2, "The Matrix", "A sci-fi classic", 8.7),
        Movie::new(3, "Interstellar", "A journey through space and time", 8.6),
        Movie::new(4, "The Dark Knight", "A gripping superhero tale", 9.0),
        Movie::new(5, "Pulp Fiction", "A cult classic crime film", 8.9),
    ]
}

/// First id that is free after `movies`: one past the largest id, or 0 when empty.
/// Saturates at `MovieId::MAX`, which is never assigned.
pub(crate) fn next_id_after(movies: &[Movie]) -> MovieId {
    movies
        .iter()
        .map(|movie| movie.id.saturating_add(1))
        .max()
        .unwrap_or(0)
}
