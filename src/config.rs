use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Serialized movie catalog (records or column-oriented JSON)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Serialized N x N similarity matrix, co-indexed with the catalog
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    #[serde(default = "default_watchlist_path")]
    pub watchlist_path: PathBuf,

    #[serde(default = "default_reviews_path")]
    pub reviews_path: PathBuf,

    #[serde(default = "default_feedback_path")]
    pub feedback_path: PathBuf,

    /// TMDB API key. Without one every poster resolves to a placeholder.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix joined with the `poster_path` TMDB returns
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Per-request timeout for poster lookups
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Number of recommendations returned when a request doesn't ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/movies.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.json")
}

fn default_watchlist_path() -> PathBuf {
    PathBuf::from("data/watchlist.json")
}

fn default_reviews_path() -> PathBuf {
    PathBuf::from("data/reviews.json")
}

fn default_feedback_path() -> PathBuf {
    PathBuf::from("data/feedback.json")
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    6
}

fn default_top_n() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The TMDB key, treating an empty value the same as an unset one
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: Vec<(&str, &str)>) -> Config {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter(vars).unwrap()
    }

    #[test]
    fn test_defaults_apply_when_env_is_empty() {
        let config = config_from(vec![]);
        assert_eq!(config.catalog_path, PathBuf::from("data/movies.json"));
        assert_eq!(config.similarity_path, PathBuf::from("data/similarity.json"));
        assert_eq!(config.poster_timeout(), Duration::from_secs(6));
        assert_eq!(config.default_top_n, 5);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config_from(vec![("TMDB_API_KEY", "  ")]);
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_overrides_from_env() {
        let config = config_from(vec![
            ("TMDB_API_KEY", "abc123"),
            ("CATALOG_PATH", "/srv/movies.json"),
            ("DEFAULT_TOP_N", "10"),
            ("PORT", "8080"),
        ]);
        assert_eq!(config.api_key(), Some("abc123"));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/movies.json"));
        assert_eq!(config.default_top_n, 10);
        assert_eq!(config.port, 8080);
    }
}
