use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{models::MovieSummary, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    q: Option<String>,
}

/// Handler listing catalog titles, optionally filtered by substring
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TitleQuery>,
) -> Json<Vec<MovieSummary>> {
    let catalog = state.catalog.catalog();

    let titles: Vec<MovieSummary> = match params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => catalog.search(q).map(MovieSummary::from).collect(),
        None => catalog.movies().iter().map(MovieSummary::from).collect(),
    };

    Json(titles)
}
