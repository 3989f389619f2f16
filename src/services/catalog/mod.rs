//! Product catalog abstraction
//!
//! Catalogs are volatile external collaborators (third-party storefronts).
//! Implementations hide their own failures: a lookup that times out, gets a
//! non-success status or cannot parse the listing returns whatever it has,
//! usually nothing, and never an error.

use std::{sync::Arc, time::Duration};

use reqwest::Client as HttpClient;

use crate::{config::Config, error::AppResult, models::Candidate};

pub mod html;

pub use html::{CatalogSite, HtmlCatalogProvider, ItemSelectors};

/// Trait for product catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog for `query`, returning at most `limit` candidates.
    ///
    /// Each candidate is stamped with the catalog name as `source` and the
    /// lowercased query.
    async fn lookup(&self, query: &str, limit: usize) -> Vec<Candidate>;

    /// Catalog name for logging and debugging
    fn name(&self) -> String;
}

/// Builds the HTTP client shared by all HTML catalogs
pub fn build_http_client(config: &Config) -> AppResult<HttpClient> {
    let client = HttpClient::builder()
        .timeout(Duration::from_secs(config.catalog_timeout_secs))
        .user_agent(config.catalog_user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Fans a single query out over several catalogs.
///
/// Each catalog is asked for an equal share of the limit (at least one item);
/// results keep catalog order and are truncated to the limit.
pub struct MultiCatalog {
    providers: Vec<Arc<dyn CatalogProvider>>,
}

impl MultiCatalog {
    pub fn new(providers: Vec<Arc<dyn CatalogProvider>>) -> Self {
        Self { providers }
    }

    /// Builds one HTML catalog per configured site
    pub fn from_sites(http_client: HttpClient, sites: Vec<CatalogSite>) -> AppResult<Self> {
        let providers = sites
            .into_iter()
            .map(|site| {
                HtmlCatalogProvider::new(http_client.clone(), site)
                    .map(|p| Arc::new(p) as Arc<dyn CatalogProvider>)
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self::new(providers))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn per_site_limit(&self, limit: usize) -> usize {
        (limit / self.providers.len().max(1)).max(1)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for MultiCatalog {
    async fn lookup(&self, query: &str, limit: usize) -> Vec<Candidate> {
        if self.providers.is_empty() || limit == 0 {
            return Vec::new();
        }

        let per_site = self.per_site_limit(limit);
        let mut candidates = Vec::new();

        for provider in &self.providers {
            let found = provider.lookup(query, per_site).await;
            tracing::debug!(
                query = %query,
                provider = %provider.name(),
                results = found.len(),
                "Catalog site searched"
            );
            candidates.extend(found);
        }

        candidates.truncate(limit);
        candidates
    }

    fn name(&self) -> String {
        "multi".to_string()
    }
}
