use std::collections::HashMap;
use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use moodrec_api::api::{create_router, AppState};
use moodrec_api::error::AppResult;
use moodrec_api::models::{BookDoc, MoodCategories, MovieResult};
use moodrec_api::services::providers::{BookCatalog, BookFilters, MovieCatalog, MovieFilters};

/// Synthetic book catalog: answers every filtered query with a couple of
/// docs derived from the first subject, so responses are deterministic.
struct StubBookCatalog;

#[async_trait::async_trait]
impl BookCatalog for StubBookCatalog {
    async fn search(
        &self,
        subjects: &[String],
        _filters: &BookFilters,
    ) -> AppResult<Vec<BookDoc>> {
        let tag = subjects
            .first()
            .cloned()
            .unwrap_or_else(|| "fallback".to_string());
        Ok(vec![
            BookDoc {
                key: Some(format!("/works/{}-1", tag)),
                title: Some(format!("{} One", tag)),
                ratings_average: Some(4.5),
                edition_count: Some(40),
                first_publish_year: Some(2001),
                cover_i: Some(11),
                ..Default::default()
            },
            BookDoc {
                key: Some(format!("/works/{}-2", tag)),
                title: Some(format!("{} Two", tag)),
                ratings_average: Some(3.0),
                edition_count: Some(5),
                first_publish_year: Some(1995),
                ..Default::default()
            },
        ])
    }

    fn cover_url(&self, doc: &BookDoc) -> Option<String> {
        doc.cover_i
            .map(|i| format!("http://covers.test/b/id/{}-L.jpg", i))
    }
}

/// Synthetic movie catalog that always returns the same single title,
/// regardless of genre filter.
struct StubMovieCatalog;

#[async_trait::async_trait]
impl MovieCatalog for StubMovieCatalog {
    async fn genre_map(&self, _language: &str) -> AppResult<HashMap<String, u64>> {
        Ok([
            ("Comedy", 35u64),
            ("Romance", 10749),
            ("Family", 10751),
            ("Animation", 16),
            ("Action", 28),
            ("Crime", 80),
            ("Thriller", 53),
            ("Drama", 18),
            ("Documentary", 99),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_string(), id))
        .collect())
    }

    async fn discover(
        &self,
        _genre_ids: &[u64],
        _filters: &MovieFilters,
    ) -> AppResult<Vec<MovieResult>> {
        Ok(vec![MovieResult {
            id: Some(603),
            title: Some("The Matrix".to_string()),
            release_date: Some("1999-03-31".to_string()),
            poster_path: Some("/matrix.jpg".to_string()),
            vote_average: Some(8.2),
            vote_count: Some(26000),
            popularity: Some(40.0),
            ..Default::default()
        }])
    }

    fn poster_url(&self, movie: &MovieResult) -> Option<String> {
        movie
            .poster_path
            .as_ref()
            .map(|p| format!("http://images.test/w342{}", p))
    }
}

fn create_test_server() -> TestServer {
    let state = AppState {
        books: Arc::new(StubBookCatalog),
        movies: Arc::new(StubMovieCatalog),
        book_moods: Arc::new(MoodCategories::book_defaults()),
        movie_moods: Arc::new(MoodCategories::movie_defaults()),
    };
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_book_recommendations_ranked_and_tagged() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations/books")
        .json(&json!({
            "probs": [0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0],
            "top_k": 1
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 2);

    // Higher edition count scores higher under the same emotion confidence
    assert_eq!(recommendations[0]["key"], "/works/Humor-1");
    assert_eq!(recommendations[0]["mood"], "Happy");
    assert_eq!(
        recommendations[0]["categories"],
        "Humor, Romance, Family life, Comics & graphic novels"
    );
    assert_eq!(
        recommendations[0]["image_url"],
        "http://covers.test/b/id/11-L.jpg"
    );
    assert!(recommendations[0]["score"].as_f64().unwrap() > recommendations[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn test_movie_recommendations_deduplicate_across_emotions() {
    let server = create_test_server();

    // Two emotion buckets both surface movie 603; the response must carry
    // a single entry for it.
    let response = server
        .post("/api/v1/recommendations/movies")
        .json(&json!({
            "probs": [0.3, 0.0, 0.0, 0.6, 0.0, 0.0, 0.1],
            "top_k": 2
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["id"], 603);
    assert_eq!(recommendations[0]["mood"], "Happy");
    assert_eq!(
        recommendations[0]["image_url"],
        "http://images.test/w342/matrix.jpg"
    );
}

#[tokio::test]
async fn test_wrong_probability_arity_is_rejected() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations/books")
        .json(&json!({ "probs": [0.5, 0.5] }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Expected 7 emotion probabilities"));
}

#[tokio::test]
async fn test_lift_mode_accepted() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations/movies")
        .json(&json!({
            "probs": [0.0, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0],
            "mode": "lift",
            "top_k": 1
        }))
        .await;

    response.assert_status_ok();
    let recommendations: Vec<serde_json::Value> = response.json();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["mood"], "Sad");
    assert_eq!(recommendations[0]["categories"], "Comedy, Family, Animation, Romance");
}
