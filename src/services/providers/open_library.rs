/// Open Library provider
///
/// Uses /search.json with repeated `subject` parameters for filtered
/// searches; zero subjects is a plain popularity query over the same
/// language and paging constraints. Covers resolve against the separate
/// covers host by cover id.
use reqwest::Client as HttpClient;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{BookDoc, BookSearchResponse},
    services::providers::{BookCatalog, BookFilters},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Field projection requested from /search.json; keeps payloads small
const SEARCH_FIELDS: &str =
    "title,author_name,first_publish_year,cover_i,ratings_average,edition_count,key";

const COVER_SIZE: &str = "L";

#[derive(Clone)]
pub struct OpenLibraryClient {
    http_client: HttpClient,
    api_url: String,
    covers_url: String,
}

impl OpenLibraryClient {
    pub fn new(api_url: String, covers_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_url,
            covers_url,
        })
    }
}

#[async_trait::async_trait]
impl BookCatalog for OpenLibraryClient {
    async fn search(
        &self,
        subjects: &[String],
        filters: &BookFilters,
    ) -> AppResult<Vec<BookDoc>> {
        let url = format!("{}/search.json", self.api_url);

        let mut params: Vec<(&str, String)> = vec![
            ("limit", filters.limit.to_string()),
            ("page", filters.page.to_string()),
        ];
        // /search.json supports repeating the subject parameter
        for subject in subjects {
            params.push(("subject", subject.clone()));
        }
        if let Some(language) = &filters.language {
            params.push(("language", language.clone()));
        }
        params.push(("fields", SEARCH_FIELDS.to_string()));

        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Open Library returned status {}: {}",
                status, body
            )));
        }

        let search_response: BookSearchResponse = response.json().await?;

        tracing::info!(
            subjects = subjects.len(),
            results = search_response.docs.len(),
            provider = "open_library",
            "Subject search completed"
        );

        Ok(search_response.docs)
    }

    fn cover_url(&self, doc: &BookDoc) -> Option<String> {
        doc.cover_i
            .map(|cover_i| format!("{}/b/id/{}-{}.jpg", self.covers_url, cover_i, COVER_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_client() -> OpenLibraryClient {
        OpenLibraryClient::new(
            "http://test.local".to_string(),
            "http://covers.test.local".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_cover_url_with_cover_id() {
        let client = create_test_client();
        let doc = BookDoc {
            cover_i: Some(14625765),
            ..Default::default()
        };

        assert_eq!(
            client.cover_url(&doc),
            Some("http://covers.test.local/b/id/14625765-L.jpg".to_string())
        );
    }

    #[test]
    fn test_cover_url_without_cover_id() {
        let client = create_test_client();
        assert_eq!(client.cover_url(&BookDoc::default()), None);
    }

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "numFound": 2,
            "docs": [
                {"key": "/works/OL1W", "title": "First", "edition_count": 3},
                {"key": "/works/OL2W", "title": "Second"}
            ]
        }"#;

        let response: BookSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.docs.len(), 2);
        assert_eq!(response.docs[0].key, Some("/works/OL1W".to_string()));
        assert_eq!(response.docs[1].edition_count, None);
    }

    #[test]
    fn test_search_response_missing_docs() {
        let response: BookSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.docs.is_empty());
    }
}
