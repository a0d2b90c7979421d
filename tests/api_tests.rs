use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use marquee_api::{
    db::{FeedbackStore, ReviewStore, WatchlistStore},
    models::{Movie, Poster, PosterQuery, PosterSource},
    routes::{create_router, AppState},
    services::{Catalog, CatalogStore, PosterProvider, SimilarityMatrix},
};

/// Resolves every movie id to a predictable URL
struct StubPosters;

#[async_trait::async_trait]
impl PosterProvider for StubPosters {
    async fn resolve(&self, query: &PosterQuery) -> Poster {
        match query.movie_id {
            Some(id) => Poster::found(format!("https://img.test/{}.jpg", id), PosterSource::MovieId),
            None => Poster::unavailable(),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn catalog() -> CatalogStore {
    let movies = vec![
        Movie::new(1, "A"),
        Movie::new(2, "B"),
        Movie::new(3, "C"),
        Movie::new(4, "The Dark Knight"),
    ];
    let similarity = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.3, 0.3],
        vec![0.9, 1.0, 0.5, 0.1],
        vec![0.3, 0.5, 1.0, 0.2],
        vec![0.3, 0.1, 0.2, 1.0],
    ])
    .unwrap();
    CatalogStore::new(Catalog::new(movies), similarity).unwrap()
}

fn create_test_server() -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState {
        catalog: catalog(),
        posters: Arc::new(StubPosters),
        watchlist: WatchlistStore::new(dir.path().join("watchlist.json")),
        reviews: ReviewStore::new(dir.path().join("reviews.json")),
        feedback: FeedbackStore::new(dir.path().join("feedback.json")),
        default_top_n: 5,
    };
    let server = TestServer::new(create_router(state)).unwrap();
    (server, dir)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _dir) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 4);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (server, _dir) = create_test_server();
    let id = "6f1c2a9e-3b1d-4c55-9a51-0f3f6b7d2e10";
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_list_and_search_titles() {
    let (server, _dir) = create_test_server();

    let titles: Vec<Value> = server.get("/api/v1/titles").await.json();
    let names: Vec<&str> = titles.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["A", "B", "C", "The Dark Knight"]);

    let titles: Vec<Value> = server
        .get("/api/v1/titles")
        .add_query_param("q", "dark")
        .await
        .json();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0]["id"], 4);
}

#[tokio::test]
async fn test_recommendations_ranked_with_posters() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "A", "top_n": 2 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["title"], "A");
    assert_eq!(
        body["recommendations"],
        json!([
            { "id": 2, "title": "B", "score": 0.9, "poster_url": "https://img.test/2.jpg", "poster_source": "movie_id" },
            { "id": 3, "title": "C", "score": 0.3, "poster_url": "https://img.test/3.jpg", "poster_source": "movie_id" }
        ])
    );
}

#[tokio::test]
async fn test_recommendations_default_top_n_caps_at_catalog() {
    let (server, _dir) = create_test_server();

    let body: Value = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "C" }))
        .await
        .json();

    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "A", "The Dark Knight"]);
}

#[tokio::test]
async fn test_recommendations_unknown_title_is_empty() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Nonexistent Title" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn test_single_poster_lookup() {
    let (server, _dir) = create_test_server();

    let poster: Value = server
        .get("/api/v1/posters")
        .add_query_param("movie_id", 2)
        .add_query_param("title", "B")
        .await
        .json();
    assert_eq!(poster["url"], "https://img.test/2.jpg");

    let poster: Value = server
        .get("/api/v1/posters")
        .add_query_param("title", "B")
        .await
        .json();
    assert_eq!(poster["source"], "unavailable");
}

#[tokio::test]
async fn test_poster_lookup_with_blank_movie_id() {
    let (server, _dir) = create_test_server();

    let response = server.get("/api/v1/posters?movie_id=&title=B").await;
    response.assert_status_ok();

    let poster: Value = response.json();
    assert_eq!(poster["source"], "unavailable");
    assert!(!poster["url"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_watchlist_flow() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/watchlist")
        .json(&json!({ "title": "The Dark Knight" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["movie_id"], 4);

    // Duplicate title is rejected and leaves one entry
    let response = server
        .post("/api/v1/watchlist")
        .json(&json!({ "title": "The Dark Knight" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let items: Vec<Value> = server.get("/api/v1/watchlist").await.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "The Dark Knight");
    assert_eq!(items[0]["poster"]["url"], "https://img.test/4.jpg");

    let response = server.delete("/api/v1/watchlist/The%20Dark%20Knight").await;
    response.assert_status(StatusCode::NO_CONTENT);

    let items: Vec<Value> = server.get("/api/v1/watchlist").await.json();
    assert!(items.is_empty());

    // Removing again is still fine
    server
        .delete("/api/v1/watchlist/The%20Dark%20Knight")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_watchlist_rejects_unknown_title() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/watchlist")
        .json(&json!({ "title": "Nope" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Nope"));
}

#[tokio::test]
async fn test_reviews_flow() {
    let (server, _dir) = create_test_server();

    let response = server
        .post("/api/v1/reviews")
        .json(&json!({ "movie": "A", "rating": 4, "review": "  Solid  " }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["user"], "Anonymous");
    assert_eq!(created["review"], "Solid");

    server
        .post("/api/v1/reviews")
        .json(&json!({ "movie": "A", "rating": 2, "review": "Meh", "user": "kim" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/v1/reviews")
        .json(&json!({ "movie": "B", "rating": 5, "review": "Great" }))
        .await
        .assert_status(StatusCode::CREATED);

    let reviews: Vec<Value> = server
        .get("/api/v1/reviews")
        .add_query_param("movie", "A")
        .await
        .json();
    assert_eq!(reviews.len(), 2);
    // Newest first
    assert_eq!(reviews[0]["user"], "kim");
    assert_eq!(reviews[1]["review"], "Solid");
}

#[tokio::test]
async fn test_review_validation() {
    let (server, _dir) = create_test_server();

    server
        .post("/api/v1/reviews")
        .json(&json!({ "movie": "A", "rating": 3, "review": "   " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/v1/reviews")
        .json(&json!({ "movie": "A", "rating": 6, "review": "Too good" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/v1/reviews")
        .json(&json!({ "movie": "Unknown", "rating": 3, "review": "Hm" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let reviews: Vec<Value> = server
        .get("/api/v1/reviews")
        .add_query_param("movie", "A")
        .await
        .json();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn test_feedback_flow() {
    let (server, _dir) = create_test_server();

    server
        .post("/api/v1/feedback")
        .json(&json!({ "name": "Ana", "email": "", "message": "Hi" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/feedback")
        .json(&json!({ "name": "Ana", "email": "ana@example.com", "message": "Nice" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let feedback: Vec<Value> = server.get("/api/v1/feedback").await.json();
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0]["name"], "Ana");
    assert!(feedback[0]["timestamp"].is_string());
}
