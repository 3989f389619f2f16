pub mod aggregator;
pub mod catalog;
pub mod recommendations;
pub mod routine;
pub mod selection;
pub mod weighting;

pub use catalog::{CatalogProvider, HtmlCatalogProvider, MultiCatalog};
pub use recommendations::{RecommendationService, RecommendationSettings};
