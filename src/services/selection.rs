use std::collections::HashMap;

use rand::{
    distributions::{Distribution, WeightedIndex},
    seq::SliceRandom,
    Rng,
};
use serde::Serialize;

use crate::models::{Candidate, WeightedCandidate};

/// Coarse product category derived from name keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Cleanser,
    Treatment,
    Moisturizer,
    Sunscreen,
    Other,
}

impl ProductCategory {
    /// Keyword table checked in priority order
    const KEYWORDS: [(ProductCategory, &'static [&'static str]); 4] = [
        (ProductCategory::Cleanser, &["cleanse", "wash"]),
        (ProductCategory::Treatment, &["serum", "treatment", "acid"]),
        (ProductCategory::Moisturizer, &["moisturiz", "cream", "lotion"]),
        (ProductCategory::Sunscreen, &["sunscreen", "spf"]),
    ];

    /// First category whose keywords appear in the lowercased name
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(ProductCategory::Other)
    }
}

/// Output caps for one selection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub max_total: usize,
    pub per_category: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            max_total: 15,
            per_category: 4,
        }
    }
}

/// Weighted draw without replacement under per-category caps.
///
/// A drawn candidate whose category is full is discarded, not returned to the
/// pool. Drawing stops once `max_total` are accepted or the pool runs dry.
/// The accepted list is shuffled before it is returned.
pub fn select_products<R: Rng + ?Sized>(
    mut pool: Vec<WeightedCandidate>,
    limits: SelectionLimits,
    rng: &mut R,
) -> Vec<Candidate> {
    let mut selected = Vec::new();
    let mut per_category: HashMap<ProductCategory, usize> = HashMap::new();

    while selected.len() < limits.max_total && !pool.is_empty() {
        let dist = match WeightedIndex::new(pool.iter().map(|w| w.weight)) {
            Ok(dist) => dist,
            Err(e) => {
                tracing::warn!(error = %e, remaining = pool.len(), "Stopping weighted draw");
                break;
            }
        };

        let drawn = pool.swap_remove(dist.sample(rng));
        let category = ProductCategory::classify(&drawn.candidate.name);
        let accepted = per_category.entry(category).or_insert(0);

        if *accepted < limits.per_category {
            *accepted += 1;
            selected.push(drawn.candidate);
        }
    }

    selected.shuffle(rng);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::SkinProfile, services::weighting::calculate_weights};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn weighted(name: &str, weight: u32) -> WeightedCandidate {
        WeightedCandidate {
            candidate: Candidate::new(name, "₹1", format!("https://shop.test/{}", name), "", "TestShop", "q"),
            weight,
        }
    }

    #[test]
    fn test_classify_priority_order() {
        assert_eq!(ProductCategory::classify("Foaming Face Wash"), ProductCategory::Cleanser);
        // "cleanse" wins over "cream"
        assert_eq!(ProductCategory::classify("Cream Cleanser"), ProductCategory::Cleanser);
        // "cleansing" does not contain "cleanse"
        assert_eq!(ProductCategory::classify("Cleansing Cream"), ProductCategory::Moisturizer);
        assert_eq!(ProductCategory::classify("Hyaluronic Acid Serum"), ProductCategory::Treatment);
        assert_eq!(ProductCategory::classify("Body LOTION"), ProductCategory::Moisturizer);
        assert_eq!(ProductCategory::classify("Moisturizing Gel"), ProductCategory::Moisturizer);
        assert_eq!(ProductCategory::classify("Mineral SPF 30"), ProductCategory::Sunscreen);
        assert_eq!(ProductCategory::classify("Jade Roller"), ProductCategory::Other);
    }

    #[test]
    fn test_empty_pool_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_products(Vec::new(), SelectionLimits::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_category_cap_discards_overflow() {
        let pool: Vec<_> = (0..10).map(|i| weighted(&format!("Serum {}", i), 1)).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_products(pool, SelectionLimits::default(), &mut rng);
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn test_total_cap() {
        let names = ["Wash", "Serum", "Cream", "SPF", "Roller"];
        let pool: Vec<_> = (0..40)
            .map(|i| weighted(&format!("{} {}", names[i % names.len()], i), 1))
            .collect();
        let mut rng = StdRng::seed_from_u64(5);
        let picked = select_products(pool, SelectionLimits::default(), &mut rng);
        assert_eq!(picked.len(), 15);
    }

    #[test]
    fn test_same_seed_same_selection() {
        let pool: Vec<_> = (0..12).map(|i| weighted(&format!("Item {}", i), i + 1)).collect();
        let limits = SelectionLimits::default();
        let a = select_products(pool.clone(), limits, &mut StdRng::seed_from_u64(42));
        let b = select_products(pool, limits, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_acne_products_favored_for_acne_prone_profile() {
        let mut pool: Vec<Candidate> = (0..5)
            .map(|i| Candidate::new("Acne Treatment", "₹1", format!("https://shop.test/acne/{}", i), "", "TestShop", "q"))
            .collect();
        pool.extend((0..15).map(|i| {
            Candidate::new(format!("Daily Treatment {}", i), "₹1", format!("https://shop.test/daily/{}", i), "", "TestShop", "q")
        }));

        let profile = SkinProfile {
            acne_level: 4,
            ..SkinProfile::new("Oily")
        };
        let weighted = calculate_weights(pool, &profile);

        let mut acne_picks = 0usize;
        let mut other_picks = 0usize;
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for picked in select_products(weighted.clone(), SelectionLimits::default(), &mut rng) {
                if picked.name == "Acne Treatment" {
                    acne_picks += 1;
                } else {
                    other_picks += 1;
                }
            }
        }

        // Per item: 5 acne items vs 15 untagged peers
        let acne_rate = acne_picks as f64 / 5.0;
        let other_rate = other_picks as f64 / 15.0;
        assert!(acne_rate > other_rate * 2.0, "{} vs {}", acne_rate, other_rate);
    }

    proptest! {
        #[test]
        fn prop_selection_respects_caps(
            entries in prop::collection::vec((0usize..5, 1u32..20), 0..60),
            seed in any::<u64>(),
        ) {
            let names = ["Gentle Wash", "Night Serum", "Day Cream", "SPF Fluid", "Gua Sha"];
            let pool: Vec<_> = entries
                .iter()
                .enumerate()
                .map(|(i, (kind, weight))| weighted(&format!("{} {}", names[*kind], i), *weight))
                .collect();
            let pool_links: HashSet<String> = pool.iter().map(|w| w.candidate.link.clone()).collect();
            let limits = SelectionLimits::default();

            let picked = select_products(pool.clone(), limits, &mut StdRng::seed_from_u64(seed));

            prop_assert!(picked.len() <= limits.max_total);
            prop_assert!(picked.len() <= pool.len());

            let mut counts: HashMap<ProductCategory, usize> = HashMap::new();
            for candidate in &picked {
                *counts.entry(ProductCategory::classify(&candidate.name)).or_insert(0) += 1;
            }
            prop_assert!(counts.values().all(|&n| n <= limits.per_category));

            let picked_links: HashSet<String> = picked.iter().map(|c| c.link.clone()).collect();
            prop_assert_eq!(picked_links.len(), picked.len());
            prop_assert!(picked_links.is_subset(&pool_links));
        }
    }
}
