use serde::{Deserialize, Serialize};

use super::{AcneSeverity, SkinTone, Texture};
use crate::error::{AppError, AppResult};

/// Concern vocabulary offered by the profile form
pub const KNOWN_CONCERNS: [&str; 5] = ["Acne", "Aging", "Dryness", "Redness", "Hyperpigmentation"];

/// Highest accepted sensitivity level
pub const MAX_SENSITIVITY: u8 = 5;

/// User-declared skin profile driving one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkinProfile {
    /// Skin type name; unrecognized values yield an empty routine
    pub skin_type: String,
    /// Pre-filled from photo analysis when available, overridable by the user
    #[serde(default)]
    pub skin_tone: SkinTone,
    #[serde(default = "default_acne_level")]
    pub acne_level: u8,
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u8,
    #[serde(default)]
    pub texture: Texture,
    #[serde(default)]
    pub concerns: Vec<String>,
}

fn default_acne_level() -> u8 {
    2
}

fn default_sensitivity() -> u8 {
    2
}

impl SkinProfile {
    /// Creates a profile with form defaults for everything but the skin type
    pub fn new(skin_type: impl Into<String>) -> Self {
        Self {
            skin_type: skin_type.into(),
            skin_tone: SkinTone::default(),
            acne_level: default_acne_level(),
            sensitivity: default_sensitivity(),
            texture: Texture::default(),
            concerns: Vec::new(),
        }
    }

    /// Rejects out-of-range levels and concerns outside the vocabulary
    pub fn validate(&self) -> AppResult<()> {
        if AcneSeverity::new(self.acne_level).is_none() {
            return Err(AppError::InvalidInput(format!(
                "acne_level must be between 0 and {}, got {}",
                AcneSeverity::MAX,
                self.acne_level
            )));
        }

        if self.sensitivity > MAX_SENSITIVITY {
            return Err(AppError::InvalidInput(format!(
                "sensitivity must be between 0 and {}, got {}",
                MAX_SENSITIVITY, self.sensitivity
            )));
        }

        if let Some(unknown) = self
            .concerns
            .iter()
            .find(|c| !KNOWN_CONCERNS.iter().any(|k| k.eq_ignore_ascii_case(c.trim())))
        {
            return Err(AppError::InvalidInput(format!(
                "Unknown skin concern: {}",
                unknown
            )));
        }

        Ok(())
    }
}
