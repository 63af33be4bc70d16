//! JSON encoding of the persisted movie list.

use crate::movie::Movie;

/// Encode the list as a JSON array of movie objects.
pub fn encode(movies: &[Movie]) -> Result<String, serde_json::Error> {
    serde_json::to_string(movies)
}

/// Decode a JSON array of movie objects.
pub fn decode(value: &str) -> Result<Vec<Movie>, serde_json::Error> {
    serde_json::from_str(value)
}
