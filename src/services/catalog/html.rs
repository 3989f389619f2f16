//! HTML storefront catalog
//!
//! Issues a GET against a site's search page and scrapes product tiles with
//! CSS selectors. Sites are described in configuration, so a storefront layout
//! change only needs a new selector.

use std::collections::HashMap;

use reqwest::{Client as HttpClient, Url};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::Candidate,
    services::catalog::CatalogProvider,
};

/// One storefront, as listed in the catalog sites file
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSite {
    pub name: String,
    /// Search page, e.g. `https://shop.test/search`
    pub search_url: String,
    /// Query-string parameter that carries the search text
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Base for resolving relative product links; the search URL when unset
    #[serde(default)]
    pub base_url: Option<String>,
    pub selectors: ItemSelectors,
    /// Extra request headers such as `Referer`
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CSS selectors for one product tile. All but `item` are relative to the tile.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSelectors {
    pub item: String,
    pub name: String,
    pub price: String,
    #[serde(default = "default_link_selector")]
    pub link: String,
    #[serde(default = "default_image_selector")]
    pub image: String,
    /// Attribute holding the image URL
    #[serde(default = "default_image_attr")]
    pub image_attr: String,
}

fn default_query_param() -> String {
    "q".to_string()
}

fn default_link_selector() -> String {
    "a".to_string()
}

fn default_image_selector() -> String {
    "img".to_string()
}

fn default_image_attr() -> String {
    "src".to_string()
}

#[derive(Clone)]
struct CompiledSelectors {
    item: Selector,
    name: Selector,
    price: Selector,
    link: Selector,
    image: Selector,
}

fn compile(site: &str, css: &str) -> AppResult<Selector> {
    Selector::parse(css).map_err(|e| {
        AppError::InvalidInput(format!(
            "Invalid selector {:?} for catalog {}: {:?}",
            css, site, e
        ))
    })
}

#[derive(Clone)]
pub struct HtmlCatalogProvider {
    http_client: HttpClient,
    site: CatalogSite,
    base_url: Url,
    selectors: CompiledSelectors,
}

impl HtmlCatalogProvider {
    /// Validates the site definition and compiles its selectors
    pub fn new(http_client: HttpClient, site: CatalogSite) -> AppResult<Self> {
        let base = site.base_url.as_deref().unwrap_or(&site.search_url);
        let base_url = Url::parse(base).map_err(|e| {
            AppError::InvalidInput(format!("Invalid URL {} for catalog {}: {}", base, site.name, e))
        })?;

        let css = &site.selectors;
        let selectors = CompiledSelectors {
            item: compile(&site.name, &css.item)?,
            name: compile(&site.name, &css.name)?,
            price: compile(&site.name, &css.price)?,
            link: compile(&site.name, &css.link)?,
            image: compile(&site.name, &css.image)?,
        };

        Ok(Self {
            http_client,
            site,
            base_url,
            selectors,
        })
    }

    #[instrument(skip(self), fields(catalog = %self.site.name))]
    async fn fetch(&self, query: &str, limit: usize) -> AppResult<Vec<Candidate>> {
        let mut request = self
            .http_client
            .get(&self.site.search_url)
            .query(&[(self.site.query_param.as_str(), query)]);
        for (header, value) in &self.site.headers {
            request = request.header(header.as_str(), value.as_str());
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "{} returned status {}",
                self.site.name,
                response.status()
            )));
        }

        let body = response.text().await?;
        Ok(self.parse_listing(&body, query, limit))
    }

    /// Extracts up to `limit` product tiles from a search page.
    ///
    /// Tiles missing a name, price or link are skipped; they still count
    /// against the limit.
    fn parse_listing(&self, html: &str, query: &str, limit: usize) -> Vec<Candidate> {
        let document = Html::parse_document(html);
        document
            .select(&self.selectors.item)
            .take(limit)
            .filter_map(|tile| self.parse_tile(tile, query))
            .collect()
    }

    fn parse_tile(&self, tile: ElementRef<'_>, query: &str) -> Option<Candidate> {
        let name = text_of(tile, &self.selectors.name)?;
        let price = text_of(tile, &self.selectors.price)?;

        let href = tile.select(&self.selectors.link).next()?.value().attr("href")?;
        let link = self.base_url.join(href).ok()?;

        let image = tile
            .select(&self.selectors.image)
            .next()
            .and_then(|img| img.value().attr(&self.site.selectors.image_attr))
            .unwrap_or_default();

        Some(Candidate::new(
            name,
            price,
            link.as_str(),
            image,
            self.site.name.as_str(),
            query,
        ))
    }
}

fn text_of(tile: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = tile.select(selector).next()?.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait::async_trait]
impl CatalogProvider for HtmlCatalogProvider {
    async fn lookup(&self, query: &str, limit: usize) -> Vec<Candidate> {
        if limit == 0 || query.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch(query, limit).await {
            Ok(candidates) => {
                tracing::debug!(
                    catalog = %self.site.name,
                    query = %query,
                    results = candidates.len(),
                    "Catalog lookup completed"
                );
                candidates
            }
            Err(e) => {
                tracing::warn!(
                    catalog = %self.site.name,
                    query = %query,
                    error = %e,
                    "Catalog lookup failed, returning no candidates"
                );
                Vec::new()
            }
        }
    }

    fn name(&self) -> String {
        self.site.name.clone()
    }
}
