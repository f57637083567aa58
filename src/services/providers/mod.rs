/// Catalog provider abstraction
///
/// Each content domain talks to its catalog through a narrow trait: one
/// filtered search call plus image resolution. The relaxation engine and
/// aggregator only see these traits, so tests can substitute synthetic
/// catalogs and other backends can be swapped in without touching the core.
use std::collections::HashMap;

use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::{BookDoc, MovieResult},
};

pub mod open_library;
pub mod tmdb;

pub use open_library::OpenLibraryClient;
pub use tmdb::TmdbClient;

/// Paging and language constraints for a book search
#[derive(Debug, Clone)]
pub struct BookFilters {
    /// Open Library language code, e.g. "eng"
    pub language: Option<String>,
    pub limit: u32,
    pub page: u32,
}

impl Default for BookFilters {
    fn default() -> Self {
        Self {
            language: Some("eng".to_string()),
            limit: 24,
            page: 1,
        }
    }
}

/// Constraints held constant across all relaxation steps of a movie search
#[derive(Debug, Clone)]
pub struct MovieFilters {
    /// TMDB locale, e.g. "en-US"
    pub language: String,
    pub region: Option<String>,
    /// Floor on vote_count; filters out barely-rated titles
    pub min_votes: u32,
    pub include_adult: bool,
    /// Only titles released on or after this date, when set
    pub recent_gte: Option<NaiveDate>,
    pub page: u32,
}

impl Default for MovieFilters {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            region: None,
            min_votes: 100,
            include_adult: false,
            recent_gte: None,
            page: 1,
        }
    }
}

/// Book catalog boundary
///
/// `search` must accept an empty subject list (unfiltered mode). Transport
/// and non-2xx failures surface as errors; the caller decides what, if
/// anything, to try next.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    /// Search works filtered by all given subjects at once
    async fn search(&self, subjects: &[String], filters: &BookFilters)
        -> AppResult<Vec<BookDoc>>;

    /// Fully-qualified cover image URL, when the doc carries a cover id
    fn cover_url(&self, doc: &BookDoc) -> Option<String>;
}

/// Movie catalog boundary
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Genre name → id map for the given locale
    async fn genre_map(&self, language: &str) -> AppResult<HashMap<String, u64>>;

    /// Discover movies matching all given genre ids; empty means unfiltered
    async fn discover(
        &self,
        genre_ids: &[u64],
        filters: &MovieFilters,
    ) -> AppResult<Vec<MovieResult>>;

    /// Fully-qualified poster URL, when the result carries a poster path
    fn poster_url(&self, movie: &MovieResult) -> Option<String>;
}
