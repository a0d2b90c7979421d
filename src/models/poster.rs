use serde::{Deserialize, Deserializer, Serialize};

/// Returned when no TMDB key is configured
pub const NO_API_KEY_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+API+Key";

/// Returned when every lookup stage came back empty or failed
pub const NO_IMAGE_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// What to look a poster up by. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterQuery {
    /// A blank value (`?movie_id=`) counts as absent
    #[serde(default, deserialize_with = "blank_as_none")]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Accepts a number, a numeric string, or a blank string meaning "no id"
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

impl PosterQuery {
    pub fn new(movie_id: Option<u64>, title: Option<String>) -> Self {
        Self { movie_id, title }
    }

    pub fn for_movie(movie_id: u64, title: &str) -> Self {
        Self {
            movie_id: Some(movie_id),
            title: Some(title.to_string()),
        }
    }
}

/// Where a poster URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosterSource {
    /// Id-based lookup returned a poster path
    MovieId,
    /// Title search returned a poster path
    TitleSearch,
    /// No API key configured; nothing was fetched
    NoApiKey,
    /// Lookups failed or found no image
    Unavailable,
}

/// A display-ready poster. `url` is always a usable, non-empty URL, placeholder or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poster {
    pub url: String,
    pub source: PosterSource,
}

impl Poster {
    pub fn found(url: String, source: PosterSource) -> Self {
        Self { url, source }
    }

    pub fn no_api_key() -> Self {
        Self {
            url: NO_API_KEY_POSTER_URL.to_string(),
            source: PosterSource::NoApiKey,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            url: NO_IMAGE_POSTER_URL.to_string(),
            source: PosterSource::Unavailable,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(
            self.source,
            PosterSource::NoApiKey | PosterSource::Unavailable
        )
    }
}
