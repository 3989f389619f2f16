use crate::models::{Candidate, SkinProfile, WeightedCandidate};

const BASE_WEIGHT: u32 = 1;
const QUERY_CONCERN_BOOST: u32 = 3;
const NAME_CONCERN_BOOST: u32 = 5;

/// Acne and sensitivity boosts only apply from this level up
const SEVERE_LEVEL: u8 = 3;

const ACNE_TERMS: [&str; 3] = ["acne", "bha", "salicylic"];
const SENSITIVE_TERMS: [&str; 3] = ["calm", "sensitive", "fragrance-free"];

/// Profile fields that influence candidate weights
#[derive(Debug, Clone)]
pub struct WeightingInput {
    concerns: Vec<String>,
    acne_level: u8,
    sensitivity: u8,
}

impl From<&SkinProfile> for WeightingInput {
    fn from(profile: &SkinProfile) -> Self {
        Self {
            concerns: profile
                .concerns
                .iter()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
            acne_level: profile.acne_level,
            sensitivity: profile.sensitivity,
        }
    }
}

impl WeightingInput {
    fn mentions_concern(&self, text: &str) -> bool {
        self.concerns.iter().any(|concern| text.contains(concern.as_str()))
    }

    /// Relevance weight of one candidate, never below 1
    pub fn weigh(&self, candidate: &Candidate) -> u32 {
        let name = candidate.name.to_lowercase();
        let query = candidate.query.to_lowercase();
        let mut weight = BASE_WEIGHT;

        if self.mentions_concern(&query) {
            weight += QUERY_CONCERN_BOOST;
        }
        if self.mentions_concern(&name) {
            weight += NAME_CONCERN_BOOST;
        }
        if self.acne_level >= SEVERE_LEVEL && ACNE_TERMS.iter().any(|t| name.contains(t)) {
            weight += u32::from(self.acne_level) * 2;
        }
        if self.sensitivity >= SEVERE_LEVEL && SENSITIVE_TERMS.iter().any(|t| name.contains(t)) {
            weight += u32::from(self.sensitivity) * 2;
        }

        weight
    }
}

/// Pairs every candidate with its weight for this profile
pub fn calculate_weights(pool: Vec<Candidate>, profile: &SkinProfile) -> Vec<WeightedCandidate> {
    let input = WeightingInput::from(profile);
    pool.into_iter()
        .map(|candidate| WeightedCandidate {
            weight: input.weigh(&candidate),
            candidate,
        })
        .collect()
}
