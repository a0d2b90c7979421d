/// TMDB poster provider
///
/// API Flow:
/// 1. Lookup by id: /movie/{id} → `poster_path`
/// 2. Fallback search: /search/movie?query={title} → first result's `poster_path`
///
/// Each stage is a single attempt bounded by the client timeout. Nothing is cached;
/// repeated calls for the same movie hit the API again.
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Poster, PosterQuery, PosterSource},
    services::providers::PosterProvider,
};

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_base_url: String,
}

impl TmdbPosterProvider {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.api_key().map(str::to_string),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.poster_timeout(),
        )
    }

    fn image_url(&self, poster_path: &str) -> String {
        if poster_path.starts_with('/') {
            format!("{}{}", self.image_base_url, poster_path)
        } else {
            format!("{}/{}", self.image_base_url, poster_path)
        }
    }

    /// GET /movie/{id}
    async fn poster_path_by_id(&self, api_key: &str, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB movie lookup returned status {}",
                response.status()
            )));
        }

        let movie: TmdbMovie = response.json().await?;
        Ok(non_empty(movie.poster_path))
    }

    /// GET /search/movie?query={title}
    async fn poster_path_by_title(&self, api_key: &str, title: &str) -> AppResult<Option<String>> {
        let url = format!("{}/search/movie", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("query", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB search returned status {}",
                response.status()
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        Ok(search
            .results
            .into_iter()
            .next()
            .and_then(|first| non_empty(first.poster_path)))
    }
}

fn non_empty(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.trim().is_empty())
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    /// A failed id lookup (network error, timeout, bad status or body) still falls
    /// through to the title search; only exhausting both stages gives the placeholder.
    async fn resolve(&self, query: &PosterQuery) -> Poster {
        let Some(api_key) = self.api_key.as_deref() else {
            return Poster::no_api_key();
        };

        if let Some(movie_id) = query.movie_id {
            match self.poster_path_by_id(api_key, movie_id).await {
                Ok(Some(path)) => {
                    return Poster::found(self.image_url(&path), PosterSource::MovieId)
                }
                Ok(None) => tracing::debug!(movie_id, "TMDB movie has no poster"),
                Err(e) => tracing::warn!(movie_id, error = %e, "Poster lookup by id failed"),
            }
        }

        let title = query
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty());

        if let Some(title) = title {
            match self.poster_path_by_title(api_key, title).await {
                Ok(Some(path)) => {
                    return Poster::found(self.image_url(&path), PosterSource::TitleSearch)
                }
                Ok(None) => tracing::debug!(title = %title, "TMDB search found no poster"),
                Err(e) => tracing::warn!(title = %title, error = %e, "Poster search failed"),
            }
        }

        Poster::unavailable()
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
