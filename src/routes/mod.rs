use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::{FeedbackStore, ReviewStore, WatchlistStore},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{CatalogStore, PosterProvider},
};

pub mod feedback;
pub mod posters;
pub mod recommendations;
pub mod reviews;
pub mod titles;
pub mod watchlist;

/// Shared application state
pub struct AppState {
    pub catalog: CatalogStore,
    pub posters: Arc<dyn PosterProvider>,
    pub watchlist: WatchlistStore,
    pub reviews: ReviewStore,
    pub feedback: FeedbackStore,
    pub default_top_n: usize,
}

impl AppState {
    pub fn from_config(
        config: &Config,
        catalog: CatalogStore,
        posters: Arc<dyn PosterProvider>,
    ) -> Self {
        Self {
            catalog,
            posters,
            watchlist: WatchlistStore::new(&config.watchlist_path),
            reviews: ReviewStore::new(&config.reviews_path),
            feedback: FeedbackStore::new(&config.feedback_path),
            default_top_n: config.default_top_n,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles", get(titles::list))
        .route("/recommendations", post(recommendations::recommend))
        .route("/posters", get(posters::resolve))
        .route("/watchlist", get(watchlist::list).post(watchlist::add))
        .route("/watchlist/:title", delete(watchlist::remove))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/feedback", get(feedback::list).post(feedback::create))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": state.catalog.catalog().len(),
        })),
    )
}
