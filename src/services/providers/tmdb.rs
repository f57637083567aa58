/// TMDB provider
///
/// Movie discovery runs through /discover/movie with `with_genres` built
/// from a genre-name → id map fetched from /genre/movie/list. Results come
/// back popularity-sorted; re-ranking is the engine's concern, not ours.
use reqwest::Client as HttpClient;
use std::collections::HashMap;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{DiscoverResponse, GenreListResponse, MovieResult},
    services::providers::{MovieCatalog, MovieFilters},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, image_base: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Config("TMDB API key is empty".to_string()));
        }

        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_base,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn genre_map(&self, language: &str) -> AppResult<HashMap<String, u64>> {
        let params = [("language", language.to_string())];
        let response: GenreListResponse = self.get_json("/genre/movie/list", &params).await?;

        Ok(response
            .genres
            .into_iter()
            .map(|genre| (genre.name, genre.id))
            .collect())
    }

    async fn discover(
        &self,
        genre_ids: &[u64],
        filters: &MovieFilters,
    ) -> AppResult<Vec<MovieResult>> {
        let mut params: Vec<(&str, String)> = vec![
            ("language", filters.language.clone()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", filters.page.to_string()),
            ("include_adult", filters.include_adult.to_string()),
            ("vote_count.gte", filters.min_votes.to_string()),
        ];
        if let Some(region) = &filters.region {
            params.push(("region", region.clone()));
        }
        if let Some(date) = filters.recent_gte {
            params.push(("primary_release_date.gte", date.format("%Y-%m-%d").to_string()));
        }
        if !genre_ids.is_empty() {
            let with_genres = genre_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("with_genres", with_genres));
        }

        let response: DiscoverResponse = self.get_json("/discover/movie", &params).await?;

        tracing::info!(
            genres = genre_ids.len(),
            results = response.results.len(),
            provider = "tmdb",
            "Discover completed"
        );

        Ok(response.results)
    }

    fn poster_url(&self, movie: &MovieResult) -> Option<String> {
        movie
            .poster_path
            .as_ref()
            .map(|path| format!("{}{}", self.image_base, path))
    }
}
