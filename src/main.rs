use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skincare_api::{
    analysis::{DetectionParams, FaceDetector, SkinAnalyzer},
    config::Config,
    routes::{create_router, AppState},
    services::{
        catalog::build_http_client, CatalogProvider, MultiCatalog, RecommendationService,
        RecommendationSettings,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skincare_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let params = DetectionParams::default();
    let analyzer = SkinAnalyzer::new(load_face_detector(&config, params)?, params);
    if !analyzer.has_detector() {
        tracing::warn!("No face detector configured, skin tone classification is disabled");
    }

    let sites = config.load_catalog_sites()?;
    let catalog = MultiCatalog::from_sites(build_http_client(&config)?, sites)?;
    if catalog.is_empty() {
        tracing::warn!("No catalog sites configured, recommendations will have no products");
    } else {
        tracing::info!(sites = catalog.len(), "Catalog sites loaded");
    }
    let catalog: Arc<dyn CatalogProvider> = Arc::new(catalog);

    let state = AppState {
        analyzer,
        recommender: RecommendationService::new(catalog, RecommendationSettings::from(&config)),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "rustface")]
fn load_face_detector(
    config: &Config,
    params: DetectionParams,
) -> anyhow::Result<Option<Arc<dyn FaceDetector>>> {
    let Some(path) = &config.face_model_path else {
        return Ok(None);
    };

    let detector = skincare_api::analysis::RustfaceDetector::from_file(path, params)?;
    tracing::info!(model = %path, "Face detection model loaded");
    Ok(Some(Arc::new(detector)))
}

#[cfg(not(feature = "rustface"))]
fn load_face_detector(
    config: &Config,
    _params: DetectionParams,
) -> anyhow::Result<Option<Arc<dyn FaceDetector>>> {
    if config.face_model_path.is_some() {
        tracing::warn!("FACE_MODEL_PATH is set but the rustface feature is disabled");
    }
    Ok(None)
}
