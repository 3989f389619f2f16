use chrono::{DateTime, Utc};
use serde::Serialize;

mod product;
mod profile;
mod skin;

pub use product::{Candidate, WeightedCandidate};
pub use profile::{SkinProfile, KNOWN_CONCERNS, MAX_SENSITIVITY};
pub use skin::{AcneSeverity, SkinTone, SkinType, Texture};

// ============================================================================
// Analysis Types
// ============================================================================

/// Location of the face used for tone classification
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FaceSummary {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Pixels inside the face that passed the skin chrominance mask
    pub skin_pixel_count: usize,
}

/// Signals derived from one photo
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkinAnalysis {
    /// `None` when no face (or no skin pixels within it) was found
    pub skin_tone: Option<SkinTone>,
    pub face: Option<FaceSummary>,
    pub acne_level: AcneSeverity,
    /// Set when acne scoring hit an error and fell back to level 0
    pub acne_scoring_failed: bool,
}

// ============================================================================
// Routine & Recommendation Types
// ============================================================================

/// One step of a skin care routine with its canonical product queries
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RoutineStep {
    pub name: &'static str,
    pub queries: &'static [&'static str],
}

/// Response for a routine lookup
#[derive(Debug, Serialize)]
pub struct RoutineResponse {
    pub skin_type: String,
    pub steps: Vec<RoutineStep>,
}

/// Response with the routine and the selected products
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub routine: Vec<RoutineStep>,
    pub products: Vec<Candidate>,
    pub generated_at: DateTime<Utc>,
}
