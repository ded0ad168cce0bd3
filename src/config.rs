use serde::Deserialize;
use std::time::Duration;

use crate::models::ColumnOverrides;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Local CSV file to load the catalog from. Takes precedence over `catalog_url`.
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Remote CSV location used when no local path is configured
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// Seconds before a loaded catalog is considered stale (0 disables expiry)
    #[serde(default = "default_catalog_ttl_secs")]
    pub catalog_ttl_secs: u64,

    /// Number of recommendations returned when a request omits `count`
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    // Explicit header overrides, one per semantic field
    #[serde(default)]
    pub column_name: Option<String>,
    #[serde(default)]
    pub column_genre: Option<String>,
    #[serde(default)]
    pub column_director: Option<String>,
    #[serde(default)]
    pub column_year: Option<String>,
    #[serde(default)]
    pub column_synopsis: Option<String>,
    #[serde(default)]
    pub column_keywords: Option<String>,
    #[serde(default)]
    pub column_cast: Option<String>,
    #[serde(default)]
    pub column_age_rating: Option<String>,
    #[serde(default)]
    pub column_rating: Option<String>,
}

fn default_catalog_url() -> String {
    "https://raw.githubusercontent.com/alokanandasengupta/recommend/main/Updated_Movie_Data_with_Keywords4.csv"
        .to_string()
}

fn default_catalog_ttl_secs() -> u64 {
    3600
}

fn default_recommendations() -> usize {
    5
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

    /// Catalog time-to-live, `None` when expiry is disabled
    pub fn catalog_ttl(&self) -> Option<Duration> {
        match self.catalog_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Header overrides for the column resolver
    pub fn column_overrides(&self) -> ColumnOverrides {
        ColumnOverrides {
            name: self.column_name.clone(),
            primary_genre: self.column_genre.clone(),
            director: self.column_director.clone(),
            release_year: self.column_year.clone(),
            synopsis: self.column_synopsis.clone(),
            keywords: self.column_keywords.clone(),
            cast: self.column_cast.clone(),
            age_rating: self.column_age_rating.clone(),
            rating: self.column_rating.clone(),
        }
    }
}
