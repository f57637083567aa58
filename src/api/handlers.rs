use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{BookDoc, Emotion, EmotionProbs, Mode, MovieResult, Recommendation},
    services::recommendations::{self, BookOptions, MovieOptions},
};

use super::AppState;

fn default_top_k() -> usize {
    2
}

fn default_book_per_emotion() -> usize {
    8
}

fn default_movie_per_emotion() -> usize {
    10
}

fn default_book_language() -> Option<String> {
    Some("eng".to_string())
}

fn default_movie_language() -> String {
    "en-US".to_string()
}

fn default_min_votes() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct BookRecommendationRequest {
    /// Probability per emotion, index-aligned with the classifier order
    pub probs: Vec<f32>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_book_per_emotion")]
    pub per_emotion: usize,
    #[serde(default = "default_book_language")]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieRecommendationRequest {
    pub probs: Vec<f32>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_movie_per_emotion")]
    pub per_emotion: usize,
    #[serde(default = "default_movie_language")]
    pub language: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_min_votes")]
    pub min_votes: u32,
    #[serde(default)]
    pub include_adult: bool,
    /// Only titles released on or after this date, e.g. "2015-01-01"
    #[serde(default)]
    pub recent_gte: Option<NaiveDate>,
}

fn parse_probs(raw: &[f32]) -> AppResult<EmotionProbs> {
    EmotionProbs::try_from(raw).map_err(|_| {
        AppError::InvalidInput(format!(
            "Expected {} emotion probabilities, got {}",
            Emotion::COUNT,
            raw.len()
        ))
    })
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Handler for book recommendations
pub async fn recommend_books(
    State(state): State<AppState>,
    Json(request): Json<BookRecommendationRequest>,
) -> AppResult<Json<Vec<Recommendation<BookDoc>>>> {
    let probs = parse_probs(&request.probs)?;
    let options = BookOptions {
        mode: request.mode,
        top_k: request.top_k,
        per_emotion: request.per_emotion,
        language: request.language,
    };

    let recommendations = recommendations::recommend_books_from_probs(
        state.books.as_ref(),
        &state.book_moods,
        &probs,
        &options,
    )
    .await?;

    Ok(Json(recommendations))
}

/// Handler for movie recommendations
pub async fn recommend_movies(
    State(state): State<AppState>,
    Json(request): Json<MovieRecommendationRequest>,
) -> AppResult<Json<Vec<Recommendation<MovieResult>>>> {
    let probs = parse_probs(&request.probs)?;
    let options = MovieOptions {
        mode: request.mode,
        top_k: request.top_k,
        per_emotion: request.per_emotion,
        language: request.language,
        region: request.region,
        min_votes: request.min_votes,
        include_adult: request.include_adult,
        recent_gte: request.recent_gte,
    };

    let recommendations = recommendations::recommend_movies_from_probs(
        state.movies.as_ref(),
        &state.movie_moods,
        &probs,
        &options,
    )
    .await?;

    Ok(Json(recommendations))
}
