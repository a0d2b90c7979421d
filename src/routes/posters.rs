use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    models::{Poster, PosterQuery},
    routes::AppState,
};

/// Handler resolving a single poster by `movie_id` and/or `title`
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PosterQuery>,
) -> Json<Poster> {
    Json(state.posters.resolve(&query).await)
}
