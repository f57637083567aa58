/// Multi-emotion aggregation
///
/// Runs discovery for the top-k predicted emotions, scores every item by
/// emotion confidence × popularity proxy, then merges the per-emotion pools
/// into one deduplicated, score-ordered list bounded by a hard cap.
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{BookDoc, CatalogItem, Emotion, EmotionProbs, Mode, MoodCategories, MovieResult,
        Recommendation},
    services::{
        discovery,
        providers::{BookCatalog, BookFilters, MovieCatalog, MovieFilters},
        ranking,
    },
};

/// Hard cap on any final recommendation list
pub const MAX_RECOMMENDATIONS: usize = 20;

#[derive(Debug, Clone)]
pub struct BookOptions {
    pub mode: Mode,
    pub top_k: usize,
    pub per_emotion: usize,
    pub language: Option<String>,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Match,
            top_k: 2,
            per_emotion: 8,
            language: Some("eng".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovieOptions {
    pub mode: Mode,
    pub top_k: usize,
    pub per_emotion: usize,
    pub language: String,
    pub region: Option<String>,
    pub min_votes: u32,
    pub include_adult: bool,
    pub recent_gte: Option<NaiveDate>,
}

impl Default for MovieOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Match,
            top_k: 2,
            per_emotion: 10,
            language: "en-US".to_string(),
            region: None,
            min_votes: 100,
            include_adult: false,
            recent_gte: None,
        }
    }
}

/// Indices of the `k` highest probabilities, descending
///
/// The selection is a stable descending sort of indices keyed by
/// probability, so ties resolve to the lower index.
pub fn top_emotions(probs: &EmotionProbs, k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..probs.len()).collect();
    indices.sort_by(|&a, &b| probs[b].total_cmp(&probs[a]));
    indices.truncate(k);
    indices
}

/// Sorts the pooled items by score and deduplicates by identity key,
/// keeping the first (highest-scored) occurrence of each key. Items with
/// no identity key are treated as always unique. Output is capped.
fn merge_ranked<T: CatalogItem>(
    mut pool: Vec<Recommendation<T>>,
    cap: usize,
) -> Vec<Recommendation<T>> {
    pool.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for rec in pool {
        if let Some(key) = rec.item.identity_key() {
            if !seen.insert(key) {
                continue;
            }
        }
        merged.push(rec);
        if merged.len() == cap {
            break;
        }
    }
    merged
}

/// Book recommendations from an emotion-probability vector
pub async fn recommend_books_from_probs(
    catalog: &dyn BookCatalog,
    moods: &MoodCategories,
    probs: &EmotionProbs,
    options: &BookOptions,
) -> AppResult<Vec<Recommendation<BookDoc>>> {
    let filters = BookFilters {
        language: options.language.clone(),
        limit: options.per_emotion as u32,
        page: 1,
    };

    let mut pool = Vec::new();
    for idx in top_emotions(probs, options.top_k) {
        let emotion = Emotion::CLASSES[idx];
        let mut found =
            discovery::discover_books_for_emotion(catalog, moods, emotion, options.mode, &filters)
                .await?;
        found.truncate(options.per_emotion);

        for mut rec in found {
            rec.score =
                f64::from(probs[idx]) * ranking::proxy_or_one(rec.item.popularity_proxy());
            pool.push(rec);
        }
    }

    let recommendations = merge_ranked(pool, MAX_RECOMMENDATIONS);
    tracing::info!(
        top_k = options.top_k,
        results = recommendations.len(),
        domain = "books",
        "Recommendations assembled"
    );
    Ok(recommendations)
}

/// Movie recommendations from an emotion-probability vector
pub async fn recommend_movies_from_probs(
    catalog: &dyn MovieCatalog,
    moods: &MoodCategories,
    probs: &EmotionProbs,
    options: &MovieOptions,
) -> AppResult<Vec<Recommendation<MovieResult>>> {
    let filters = MovieFilters {
        language: options.language.clone(),
        region: options.region.clone(),
        min_votes: options.min_votes,
        include_adult: options.include_adult,
        recent_gte: options.recent_gte,
        page: 1,
    };

    let mut pool = Vec::new();
    for idx in top_emotions(probs, options.top_k) {
        let emotion = Emotion::CLASSES[idx];
        let mut found = discovery::discover_movies_for_emotion(
            catalog,
            moods,
            emotion,
            options.mode,
            &filters,
        )
        .await?;
        found.truncate(options.per_emotion);

        for mut rec in found {
            rec.score =
                f64::from(probs[idx]) * ranking::proxy_or_one(rec.item.popularity_proxy());
            pool.push(rec);
        }
    }

    let recommendations = merge_ranked(pool, MAX_RECOMMENDATIONS);
    tracing::info!(
        top_k = options.top_k,
        results = recommendations.len(),
        domain = "movies",
        "Recommendations assembled"
    );
    Ok(recommendations)
}
