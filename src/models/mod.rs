use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub mod mapping;

pub use mapping::{CategoryRow, MoodCategories};

/// Emotion classes in the classifier's output order
///
/// Probability vectors are index-aligned with `Emotion::CLASSES`, so the
/// order here must match the order the upstream model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const COUNT: usize = 7;

    /// Classifier label order
    pub const CLASSES: [Emotion; Emotion::COUNT] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability per emotion, index-aligned with `Emotion::CLASSES`.
/// Not required to sum to 1; ties are allowed.
pub type EmotionProbs = [f32; Emotion::COUNT];

/// Category selection mode: mirror the detected mood, or shift it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Match,
    Lift,
}

/// Deserializes a numeric field tolerantly: anything that is not a number
/// becomes `None` instead of failing the whole payload. Catalog APIs
/// occasionally return junk (strings, nulls) in numeric slots.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64())
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}

/// A search document from the Open Library /search.json endpoint
///
/// Only the projected fields are kept; everything is optional because the
/// catalog omits fields freely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookDoc {
    /// Work key, e.g. "/works/OL45883W"; the dedup identity for books
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub first_publish_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub cover_i: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ratings_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub edition_count: Option<u64>,
}

/// Raw response from Open Library /search.json
#[derive(Debug, Deserialize)]
pub struct BookSearchResponse {
    #[serde(default)]
    pub docs: Vec<BookDoc>,
}

/// A result from the TMDB /discover/movie endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieResult {
    /// TMDB movie id; the dedup identity for movies
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub popularity: Option<f64>,
}

/// Raw response from TMDB /discover/movie
#[derive(Debug, Deserialize)]
pub struct DiscoverResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
}

/// One entry from TMDB /genre/movie/list
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Ranking and scoring signals common to both catalog item shapes
///
/// The accessors return `Option`; the sentinel defaults applied on absence
/// live in `services::ranking` so they are defined in exactly one place.
pub trait CatalogItem {
    /// Unique source identifier used for deduplication
    fn identity_key(&self) -> Option<String>;
    /// Rating-like quality signal (ratings_average / vote_average)
    fn rating(&self) -> Option<f64>;
    /// Count-like popularity signal (edition_count / vote_count)
    fn count_proxy(&self) -> Option<u64>;
    /// Publication or release year
    fn year(&self) -> Option<i64>;
    /// Popularity signal used for confidence-weighted scoring
    fn popularity_proxy(&self) -> Option<f64>;
}

impl CatalogItem for BookDoc {
    fn identity_key(&self) -> Option<String> {
        self.key.clone()
    }

    fn rating(&self) -> Option<f64> {
        self.ratings_average
    }

    fn count_proxy(&self) -> Option<u64> {
        self.edition_count
    }

    fn year(&self) -> Option<i64> {
        self.first_publish_year
    }

    fn popularity_proxy(&self) -> Option<f64> {
        self.edition_count.map(|c| c as f64)
    }
}

impl CatalogItem for MovieResult {
    fn identity_key(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    fn rating(&self) -> Option<f64> {
        self.vote_average
    }

    fn count_proxy(&self) -> Option<u64> {
        self.vote_count
    }

    fn year(&self) -> Option<i64> {
        // "2010-07-16" -> 2010
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    fn popularity_proxy(&self) -> Option<f64> {
        self.popularity
    }
}

/// A catalog item enriched with the mood that found it, the category subset
/// that produced it, a resolved display image, and a relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<T> {
    #[serde(flatten)]
    pub item: T,
    pub mood: Emotion,
    pub categories: String,
    pub image_url: Option<String>,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_doc_deserialization() {
        let json = r#"{
            "key": "/works/OL45883W",
            "title": "The Hobbit",
            "author_name": ["J.R.R. Tolkien"],
            "first_publish_year": 1937,
            "cover_i": 14625765,
            "ratings_average": 4.2,
            "edition_count": 120
        }"#;

        let doc: BookDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.key, Some("/works/OL45883W".to_string()));
        assert_eq!(doc.title, Some("The Hobbit".to_string()));
        assert_eq!(doc.author_name, vec!["J.R.R. Tolkien".to_string()]);
        assert_eq!(doc.first_publish_year, Some(1937));
        assert_eq!(doc.ratings_average, Some(4.2));
        assert_eq!(doc.edition_count, Some(120));
    }

    #[test]
    fn test_book_doc_lenient_numeric_fields() {
        // Junk in numeric slots degrades to None, never an error
        let json = r#"{
            "key": "/works/OL1W",
            "ratings_average": "not a number",
            "edition_count": null,
            "first_publish_year": "unknown"
        }"#;

        let doc: BookDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.ratings_average, None);
        assert_eq!(doc.edition_count, None);
        assert_eq!(doc.first_publish_year, None);
    }

    #[test]
    fn test_movie_result_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-16",
            "poster_path": "/edv5CZvWj09upOsy2Y6IwDhK8bt.jpg",
            "vote_average": 8.4,
            "vote_count": 34562,
            "popularity": 83.7
        }"#;

        let movie: MovieResult = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, Some(27205));
        assert_eq!(movie.title, Some("Inception".to_string()));
        assert_eq!(movie.vote_average, Some(8.4));
        assert_eq!(movie.popularity, Some(83.7));
    }

    #[test]
    fn test_movie_result_lenient_numeric_fields() {
        let json = r#"{
            "id": "27205",
            "vote_average": "8.4",
            "popularity": {}
        }"#;

        let movie: MovieResult = serde_json::from_str(json).unwrap();
        // Strings are not coerced, even when numeric-looking
        assert_eq!(movie.id, None);
        assert_eq!(movie.vote_average, None);
        assert_eq!(movie.popularity, None);
    }

    #[test]
    fn test_movie_year_from_release_date() {
        let movie = MovieResult {
            release_date: Some("2010-07-16".to_string()),
            ..Default::default()
        };
        assert_eq!(movie.year(), Some(2010));

        let movie = MovieResult {
            release_date: Some("bad".to_string()),
            ..Default::default()
        };
        assert_eq!(movie.year(), None);

        let movie = MovieResult::default();
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_identity_keys() {
        let doc = BookDoc {
            key: Some("/works/OL45883W".to_string()),
            ..Default::default()
        };
        assert_eq!(doc.identity_key(), Some("/works/OL45883W".to_string()));

        let movie = MovieResult {
            id: Some(27205),
            ..Default::default()
        };
        assert_eq!(movie.identity_key(), Some("27205".to_string()));

        assert_eq!(BookDoc::default().identity_key(), None);
        assert_eq!(MovieResult::default().identity_key(), None);
    }

    #[test]
    fn test_emotion_class_order() {
        assert_eq!(Emotion::CLASSES[0], Emotion::Angry);
        assert_eq!(Emotion::CLASSES[3], Emotion::Happy);
        assert_eq!(Emotion::CLASSES[6], Emotion::Neutral);
        assert_eq!(Emotion::CLASSES.len(), Emotion::COUNT);
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Lift).unwrap(), r#""lift""#);
        let mode: Mode = serde_json::from_str(r#""match""#).unwrap();
        assert_eq!(mode, Mode::Match);
    }

    #[test]
    fn test_recommendation_serializes_flat() {
        let rec = Recommendation {
            item: MovieResult {
                id: Some(27205),
                title: Some("Inception".to_string()),
                ..Default::default()
            },
            mood: Emotion::Surprise,
            categories: "Mystery, Sci-Fi".to_string(),
            image_url: None,
            score: 12.5,
        };

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["id"], 27205);
        assert_eq!(value["title"], "Inception");
        assert_eq!(value["mood"], "Surprise");
        assert_eq!(value["score"], 12.5);
    }
}
