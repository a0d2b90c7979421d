use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Review,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub movie: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub movie: String,
    pub rating: u8,
    pub review: String,
    #[serde(default)]
    pub user: Option<String>,
}

/// Handler listing reviews for a movie, newest first
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReviewQuery>,
) -> Json<Vec<Review>> {
    let mut reviews = state.reviews.for_movie(&query.movie);
    // Reverse first so same-second reviews also come out newest first
    reviews.reverse();
    reviews.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Json(reviews)
}

/// Handler for submitting a review of a catalog title
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<Review>)> {
    if state.catalog.catalog().find(&request.movie).is_none() {
        return Err(AppError::NotFound(format!(
            "No movie titled {:?}",
            request.movie
        )));
    }

    let review = Review::new(
        &request.movie,
        request.rating,
        &request.review,
        request.user.as_deref(),
    )?;
    state.reviews.add(review.clone())?;

    tracing::info!(movie = %review.movie, rating = review.rating, "Review submitted");
    Ok((StatusCode::CREATED, Json(review)))
}
