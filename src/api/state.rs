use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    models::MoodCategories,
    services::providers::{BookCatalog, MovieCatalog, OpenLibraryClient, TmdbClient},
};

/// Shared application state
///
/// Everything here is read-only after startup: catalog clients plus the
/// injected emotion → category tables. Tests substitute synthetic catalogs
/// or alternate tables by constructing the state directly.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookCatalog>,
    pub movies: Arc<dyn MovieCatalog>,
    pub book_moods: Arc<MoodCategories>,
    pub movie_moods: Arc<MoodCategories>,
}

impl AppState {
    /// Builds the production state: real catalog clients, default tables
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let books = OpenLibraryClient::new(
            config.openlibrary_api_url.clone(),
            config.covers_api_url.clone(),
        )?;
        let movies = TmdbClient::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base.clone(),
        )?;

        Ok(Self {
            books: Arc::new(books),
            movies: Arc::new(movies),
            book_moods: Arc::new(MoodCategories::book_defaults()),
            movie_moods: Arc::new(MoodCategories::movie_defaults()),
        })
    }
}
