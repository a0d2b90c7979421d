use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A catalog entry.
///
/// `id` is the external (TMDB) identifier, resolved at load time from whichever
/// of the accepted id columns the artifact carries. Everything that isn't the id
/// or the title is kept verbatim in `metadata`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// Lightweight listing entry for title selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

/// One ranked result of a similarity query, borrowing the movie from the catalog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub movie: &'a Movie,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_is_flattened() {
        let mut movie = Movie::new(19995, "Avatar");
        movie
            .metadata
            .insert("tags".to_string(), json!("action adventure"));

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(
            value,
            json!({ "id": 19995, "title": "Avatar", "tags": "action adventure" })
        );
    }

    #[test]
    fn test_summary_from_movie() {
        let movie = Movie::new(285, "Pirates of the Caribbean: At World's End");
        let summary = MovieSummary::from(&movie);
        assert_eq!(summary.id, 285);
        assert_eq!(summary.title, "Pirates of the Caribbean: At World's End");
    }
}
