use std::time::Duration;

use crate::util::env as env_util;

/// Explicit configuration for the catalog backend connections.
///
/// The attribute/filter endpoint lives behind a configurable base URL
/// (`API_BASE_URL`), while the category and product endpoints are served by
/// the local backend (`BACKEND_BASE_URL`). Both fall back to the same local
/// address when unset.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api_base_url: String,
    pub backend_base_url: String,
    /// Per-request timeout applied to every catalog fetch.
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            backend_base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl CatalogConfig {
    /// Build configuration from environment variables, falling back to the
    /// local backend defaults.
    pub fn from_env() -> Self {
        env_util::init_env();
        let defaults = Self::default();
        Self {
            api_base_url: env_util::env_opt("API_BASE_URL").unwrap_or(defaults.api_base_url),
            backend_base_url: env_util::env_opt("BACKEND_BASE_URL")
                .unwrap_or(defaults.backend_base_url),
            timeout: Duration::from_secs(env_util::env_parse("CATALOG_TIMEOUT_SECS", 15u64)),
        }
    }
}
