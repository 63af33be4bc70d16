use serde::{Deserialize, Serialize};

use crate::movie::{default_movies, Movie};

/// Key the movie list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "movies";

/// What a store starts with when the medium holds nothing under its key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedCatalog {
    /// The five built-in movies, ids 1 to 5.
    #[default]
    Default,
    Empty,
    Custom(Vec<Movie>),
}

impl SeedCatalog {
    pub fn movies(&self) -> Vec<Movie> {
        match self {
            SeedCatalog::Default => default_movies(),
            SeedCatalog::Empty => Vec::new(),
            SeedCatalog::Custom(movies) => movies.clone(),
        }
    }
}

/// Options for [`MovieStore::open_with`](crate::MovieStore::open_with).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub key: String,
    pub seed: SeedCatalog,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            key: DEFAULT_STORAGE_KEY.to_string(),
            seed: SeedCatalog::Default,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_seed(mut self, seed: SeedCatalog) -> Self {
        self.seed = seed;
        self
    }
}
