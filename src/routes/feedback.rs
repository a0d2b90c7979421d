use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::AppResult, models::FeedbackEntry, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Handler listing all feedback, newest first
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<FeedbackEntry>> {
    let mut entries = state.feedback.all();
    entries.reverse();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Json(entries)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<FeedbackEntry>)> {
    let entry = FeedbackEntry::new(&request.name, &request.email, &request.message)?;
    state.feedback.add(entry.clone())?;

    tracing::info!("Feedback received");
    Ok((StatusCode::CREATED, Json(entry)))
}
