use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Poster, PosterQuery, WatchlistEntry},
    routes::AppState,
    services::posters::resolve_posters,
};

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct WatchlistItem {
    #[serde(flatten)]
    pub entry: WatchlistEntry,
    pub poster: Poster,
}

/// Handler listing the watchlist with posters
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<WatchlistItem>> {
    let entries = state.watchlist.entries();

    let queries = entries
        .iter()
        .map(|entry| PosterQuery::for_movie(entry.movie_id, &entry.title))
        .collect();
    let posters = resolve_posters(state.posters.clone(), queries).await;

    Json(
        entries
            .into_iter()
            .zip(posters)
            .map(|(entry, poster)| WatchlistItem { entry, poster })
            .collect(),
    )
}

/// Handler adding a catalog title to the watchlist
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddWatchlistRequest>,
) -> AppResult<(StatusCode, Json<WatchlistEntry>)> {
    let movie = state
        .catalog
        .catalog()
        .find(&request.title)
        .ok_or_else(|| AppError::NotFound(format!("No movie titled {:?}", request.title)))?;

    let entry = WatchlistEntry::new(&movie.title, movie.id);
    if !state.watchlist.add(entry.clone())? {
        return Err(AppError::Conflict(format!(
            "{:?} is already in the watchlist",
            movie.title
        )));
    }

    tracing::info!(title = %entry.title, movie_id = entry.movie_id, "Added to watchlist");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Handler removing a title from the watchlist; removing an absent title is not an error
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> AppResult<StatusCode> {
    if state.watchlist.remove(&title)? {
        tracing::info!(title = %title, "Removed from watchlist");
    }
    Ok(StatusCode::NO_CONTENT)
}
