use serde::Deserialize;

use crate::services::catalog::CatalogSite;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file listing the catalog sites to query. Without it every
    /// lookup yields an empty pool.
    #[serde(default)]
    pub catalog_sites_path: Option<String>,

    /// Per-request timeout for catalog lookups, in seconds
    #[serde(default = "default_catalog_timeout_secs")]
    pub catalog_timeout_secs: u64,

    /// User-Agent sent to catalog sites
    #[serde(default = "default_catalog_user_agent")]
    pub catalog_user_agent: String,

    /// Maximum candidates requested per catalog query
    #[serde(default = "default_per_query_limit")]
    pub per_query_limit: usize,

    /// Maximum number of recommended products
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Maximum accepted products per category
    #[serde(default = "default_category_cap")]
    pub category_cap: usize,

    /// Fixed seed for the selection RNG; entropy-seeded per request when unset
    #[serde(default)]
    pub recommendation_seed: Option<u64>,

    /// SeetaFace model used by the rustface detector backend
    #[serde(default)]
    pub face_model_path: Option<String>,

    /// Body limit for image uploads, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_timeout_secs() -> u64 {
    10
}

fn default_catalog_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_per_query_limit() -> usize {
    2
}

fn default_max_recommendations() -> usize {
    15
}

fn default_category_cap() -> usize {
    4
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_sites_path: None,
            catalog_timeout_secs: default_catalog_timeout_secs(),
            catalog_user_agent: default_catalog_user_agent(),
            per_query_limit: default_per_query_limit(),
            max_recommendations: default_max_recommendations(),
            category_cap: default_category_cap(),
            recommendation_seed: None,
            face_model_path: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load the catalog site definitions referenced by `catalog_sites_path`
    pub fn load_catalog_sites(&self) -> anyhow::Result<Vec<CatalogSite>> {
        let Some(path) = &self.catalog_sites_path else {
            return Ok(Vec::new());
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read catalog sites from {}: {}", path, e))?;
        serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog sites in {}: {}", path, e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_recommendation_limits() {
        let config = Config::default();
        assert_eq!(config.per_query_limit, 2);
        assert_eq!(config.max_recommendations, 15);
        assert_eq!(config.category_cap, 4);
        assert_eq!(config.catalog_timeout_secs, 10);
        assert!(config.recommendation_seed.is_none());
    }

    #[test]
    fn test_envy_parses_overrides() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("PER_QUERY_LIMIT".to_string(), "3".to_string()),
            ("RECOMMENDATION_SEED".to_string(), "7".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.per_query_limit, 3);
        assert_eq!(config.recommendation_seed, Some(7));
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_no_sites_path_yields_no_sites() {
        let config = Config::default();
        assert!(config.load_catalog_sites().unwrap().is_empty());
    }

    #[test]
    fn test_missing_sites_file_is_an_error() {
        let config = Config {
            catalog_sites_path: Some("/nonexistent/sites.json".to_string()),
            ..Config::default()
        };
        assert!(config.load_catalog_sites().is_err());
    }
}
