use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key; required, movie discovery cannot run without it
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL for TMDB poster images
    #[serde(default = "default_tmdb_image_base")]
    pub tmdb_image_base: String,

    /// Open Library API base URL
    #[serde(default = "default_openlibrary_api_url")]
    pub openlibrary_api_url: String,

    /// Open Library covers host
    #[serde(default = "default_covers_api_url")]
    pub covers_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base() -> String {
    "https://image.tmdb.org/t/p/w342".to_string()
}

fn default_openlibrary_api_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_covers_api_url() -> String {
    "https://covers.openlibrary.org".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
