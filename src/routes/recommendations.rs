use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    middleware::RequestId,
    models::{PosterQuery, PosterSource},
    routes::AppState,
    services::{posters::resolve_posters, recommendations},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub id: u64,
    pub title: String,
    pub score: f64,
    pub poster_url: String,
    pub poster_source: PosterSource,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<RecommendedMovie>,
}

/// Handler for recommendations endpoint
///
/// Unknown titles produce an empty list rather than an error.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let top_n = request.top_n.unwrap_or(state.default_top_n);

    let ranked: Vec<(u64, String, f64)> =
        recommendations::recommend(&state.catalog, &request.title, top_n)
            .into_iter()
            .map(|r| (r.movie.id, r.movie.title.clone(), r.score))
            .collect();

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        top_n,
        results = ranked.len(),
        "Recommendations ranked"
    );

    let queries = ranked
        .iter()
        .map(|(id, title, _)| PosterQuery::for_movie(*id, title))
        .collect();
    let posters = resolve_posters(state.posters.clone(), queries).await;

    let recommendations = ranked
        .into_iter()
        .zip(posters)
        .map(|((id, title, score), poster)| RecommendedMovie {
            id,
            title,
            score,
            poster_url: poster.url,
            poster_source: poster.source,
        })
        .collect();

    Json(RecommendationResponse {
        title: request.title,
        recommendations,
    })
}
