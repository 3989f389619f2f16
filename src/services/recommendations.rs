use std::sync::Arc;

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::Config,
    models::{RecommendationResponse, SkinProfile},
    services::{
        aggregator::{build_queries, gather_candidates},
        catalog::CatalogProvider,
        routine::plan_routine,
        selection::{select_products, SelectionLimits},
        weighting::calculate_weights,
    },
};

/// Tunables for one recommendation run
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSettings {
    pub per_query_limit: usize,
    pub limits: SelectionLimits,
    /// Fixed RNG seed; entropy-seeded per request when unset
    pub seed: Option<u64>,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            per_query_limit: 2,
            limits: SelectionLimits::default(),
            seed: None,
        }
    }
}

impl From<&Config> for RecommendationSettings {
    fn from(config: &Config) -> Self {
        Self {
            per_query_limit: config.per_query_limit,
            limits: SelectionLimits {
                max_total: config.max_recommendations,
                per_category: config.category_cap,
            },
            seed: config.recommendation_seed,
        }
    }
}

/// Generates a personalized routine and product list
///
/// Flow: routine for the skin type, routine plus specialized queries, catalog
/// fan-out, weighting against the profile, capped weighted selection.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<dyn CatalogProvider>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn CatalogProvider>, settings: RecommendationSettings) -> Self {
        Self { catalog, settings }
    }

    fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Builds recommendations for an already validated profile
    pub async fn recommend(&self, profile: &SkinProfile) -> RecommendationResponse {
        let routine = plan_routine(&profile.skin_type);
        let queries = build_queries(&routine, profile);

        tracing::info!(
            skin_type = %profile.skin_type,
            steps = routine.len(),
            queries = queries.len(),
            catalog = %self.catalog.name(),
            "Gathering recommendation candidates"
        );

        let pool = gather_candidates(
            Arc::clone(&self.catalog),
            queries,
            self.settings.per_query_limit,
        )
        .await;
        let pool_size = pool.len();

        let weighted = calculate_weights(pool, profile);
        let products = select_products(weighted, self.settings.limits, &mut self.rng());

        tracing::info!(
            pool_size,
            selected = products.len(),
            "Recommendations selected"
        );

        RecommendationResponse {
            routine,
            products,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Candidate,
        services::{catalog::MockCatalogProvider, selection::ProductCategory},
    };
    use std::collections::HashMap;

    fn catalog_returning_per_query(count: usize) -> MockCatalogProvider {
        let mut mock = MockCatalogProvider::new();
        mock.expect_lookup().returning(move |query, limit| {
            (0..count.min(limit))
                .map(|i| {
                    Candidate::new(
                        format!("{} {}", query, i),
                        "₹499",
                        format!("https://shop.test/{}/{}", query.replace(' ', "-"), i),
                        "",
                        "mock",
                        query,
                    )
                })
                .collect()
        });
        mock.expect_name().return_const("mock".to_string());
        mock
    }

    fn seeded(seed: u64) -> RecommendationSettings {
        RecommendationSettings {
            seed: Some(seed),
            ..RecommendationSettings::default()
        }
    }

    #[tokio::test]
    async fn test_recommend_respects_caps() {
        let service = RecommendationService::new(Arc::new(catalog_returning_per_query(2)), seeded(7));
        let profile = SkinProfile {
            acne_level: 4,
            sensitivity: 3,
            concerns: vec!["Acne".to_string()],
            ..SkinProfile::new("Oily")
        };

        let response = service.recommend(&profile).await;

        assert_eq!(response.routine.len(), 5);
        assert!(!response.products.is_empty());
        assert!(response.products.len() <= 15);

        let mut counts: HashMap<ProductCategory, usize> = HashMap::new();
        for product in &response.products {
            *counts.entry(ProductCategory::classify(&product.name)).or_insert(0) += 1;
        }
        assert!(counts.values().all(|&n| n <= 4));
    }

    #[tokio::test]
    async fn test_seeded_service_is_reproducible() {
        let profile = SkinProfile::new("Dry");
        let first = RecommendationService::new(Arc::new(catalog_returning_per_query(2)), seeded(11))
            .recommend(&profile)
            .await;
        let second = RecommendationService::new(Arc::new(catalog_returning_per_query(2)), seeded(11))
            .recommend(&profile)
            .await;
        assert_eq!(first.products, second.products);
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_routine_without_products() {
        let service = RecommendationService::new(Arc::new(catalog_returning_per_query(0)), seeded(1));
        let response = service.recommend(&SkinProfile::new("Sensitive")).await;
        assert_eq!(response.routine.len(), 5);
        assert!(response.products.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_skin_type_still_uses_specialized_queries() {
        let mut mock = MockCatalogProvider::new();
        // Defaults: acne 2, sensitivity 2, Medium tone => 9 specialized queries
        mock.expect_lookup().times(9).returning(|_, _| Vec::new());
        mock.expect_name().return_const("mock".to_string());

        let service = RecommendationService::new(Arc::new(mock), seeded(1));
        let response = service.recommend(&SkinProfile::new("Martian")).await;
        assert!(response.routine.is_empty());
        assert!(response.products.is_empty());
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            per_query_limit: 3,
            max_recommendations: 10,
            category_cap: 2,
            recommendation_seed: Some(9),
            ..Config::default()
        };
        let settings = RecommendationSettings::from(&config);
        assert_eq!(settings.per_query_limit, 3);
        assert_eq!(settings.limits.max_total, 10);
        assert_eq!(settings.limits.per_category, 2);
        assert_eq!(settings.seed, Some(9));
    }
}
