use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    models::{Candidate, RoutineStep, SkinProfile, SkinTone},
    services::catalog::CatalogProvider,
};

/// Acne and sensitivity levels at which extra targeted queries are issued
const SPECIALIZED_LEVEL: u8 = 2;

/// Extra queries driven by acne level, sensitivity and skin tone
pub fn specialized_queries(profile: &SkinProfile) -> Vec<String> {
    let mut queries = Vec::new();

    if profile.acne_level >= SPECIALIZED_LEVEL {
        queries.push(format!("{}% BHA Exfoliant", profile.acne_level));
        queries.push("Acne Treatment Serum".to_string());
        queries.push("Non-Comedogenic Moisturizer".to_string());
    }

    if profile.sensitivity >= SPECIALIZED_LEVEL {
        queries.extend(
            ["Fragrance-Free Cream", "Hypoallergenic Serum", "Soothing Repair Treatment"]
                .map(String::from),
        );
    }

    let tone_queries: &[&str] = match profile.skin_tone {
        SkinTone::Dark | SkinTone::Deep => &[
            "Dark Spot Corrector",
            "Hyperpigmentation Treatment",
            "Even Tone Serum",
        ],
        SkinTone::Light | SkinTone::Medium => {
            &["Brightening Serum", "Vitamin C Treatment", "Glow Boosting Cream"]
        }
        SkinTone::Olive | SkinTone::Tan => &[],
    };
    queries.extend(tone_queries.iter().map(|q| q.to_string()));

    queries
}

/// Every routine-step query in step order, followed by the specialized ones
pub fn build_queries(routine: &[RoutineStep], profile: &SkinProfile) -> Vec<String> {
    routine
        .iter()
        .flat_map(|step| step.queries.iter().map(|q| q.to_string()))
        .chain(specialized_queries(profile))
        .collect()
}

/// Looks up every query concurrently and concatenates results in query order.
///
/// Lookups run in a `JoinSet`, so dropping the returned future aborts any
/// that are still in flight. A task that panics contributes nothing; the rest
/// of the pool is still returned.
pub async fn gather_candidates(
    catalog: Arc<dyn CatalogProvider>,
    queries: Vec<String>,
    per_query_limit: usize,
) -> Vec<Candidate> {
    let mut tasks = JoinSet::new();
    let mut slots: Vec<Vec<Candidate>> = vec![Vec::new(); queries.len()];

    for (index, query) in queries.into_iter().enumerate() {
        let catalog = Arc::clone(&catalog);
        tasks.spawn(async move {
            let tag = query.to_lowercase();
            let found = catalog
                .lookup(&query, per_query_limit)
                .await
                .into_iter()
                .map(|mut candidate| {
                    candidate.query = tag.clone();
                    candidate
                })
                .collect::<Vec<_>>();
            (index, found)
        });
    }

    let mut failed = 0usize;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, found)) => slots[index] = found,
            Err(e) => {
                tracing::error!(error = %e, "Catalog lookup task failed");
                failed += 1;
            }
        }
    }

    let pool: Vec<Candidate> = slots.into_iter().flatten().collect();

    tracing::info!(
        candidates = pool.len(),
        failed_lookups = failed,
        "Candidate pool gathered"
    );

    pool
}
