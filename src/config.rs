use std::path::PathBuf;

use serde::Deserialize;

use crate::services::{aggregator, popularity, recommender};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Books CSV file
    #[serde(default = "default_books_path")]
    pub books_path: PathBuf,

    /// Ratings CSV file
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Minimum rating count for a book to enter the catalog
    #[serde(default = "default_min_ratings")]
    pub min_ratings: usize,

    /// Recommendations returned per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Featured books shown per page view
    #[serde(default = "default_popular_sample_size")]
    pub popular_sample_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_books_path() -> PathBuf {
    PathBuf::from("data/Books.csv")
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("data/Ratings.csv")
}

fn default_min_ratings() -> usize {
    aggregator::DEFAULT_MIN_RATINGS
}

fn default_recommendation_count() -> usize {
    recommender::DEFAULT_RECOMMENDATIONS
}

fn default_popular_sample_size() -> usize {
    popularity::DEFAULT_SAMPLE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            books_path: default_books_path(),
            ratings_path: default_ratings_path(),
            min_ratings: default_min_ratings(),
            recommendation_count: default_recommendation_count(),
            popular_sample_size: default_popular_sample_size(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
