use std::sync::Arc;

use crate::config::Config;
use crate::data::Catalog;

/// Per-request limits taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct QuerySettings {
    pub recommendation_count: usize,
    pub popular_sample_size: usize,
}

impl From<&Config> for QuerySettings {
    fn from(config: &Config) -> Self {
        Self {
            recommendation_count: config.recommendation_count,
            popular_sample_size: config.popular_sample_size,
        }
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Shared application state
///
/// The catalog is read-only for the lifetime of the process, so handlers
/// share it through an `Arc` without any locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub settings: QuerySettings,
}

impl AppState {
    pub fn new(catalog: Catalog, settings: QuerySettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            settings,
        }
    }
}
