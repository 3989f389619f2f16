use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Skin tone classes, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkinTone {
    Light,
    #[default]
    Medium,
    Olive,
    Tan,
    Dark,
    Deep,
}

impl SkinTone {
    /// All tones in enumeration order. Classification ties resolve to the
    /// earliest entry.
    pub const ALL: [SkinTone; 6] = [
        SkinTone::Light,
        SkinTone::Medium,
        SkinTone::Olive,
        SkinTone::Tan,
        SkinTone::Dark,
        SkinTone::Deep,
    ];

    /// Reference color in 8-bit LAB (L scaled to 0-255, a/b offset by 128)
    pub fn anchor(self) -> [f32; 3] {
        match self {
            SkinTone::Light => [200.0, 128.0, 128.0],
            SkinTone::Medium => [150.0, 130.0, 140.0],
            SkinTone::Olive => [130.0, 140.0, 150.0],
            SkinTone::Tan => [110.0, 150.0, 160.0],
            SkinTone::Dark => [80.0, 160.0, 170.0],
            SkinTone::Deep => [50.0, 170.0, 180.0],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkinTone::Light => "Light",
            SkinTone::Medium => "Medium",
            SkinTone::Olive => "Olive",
            SkinTone::Tan => "Tan",
            SkinTone::Dark => "Dark",
            SkinTone::Deep => "Deep",
        }
    }
}

impl Display for SkinTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SkinTone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkinTone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown skin tone: {}", s))
    }
}

/// Acne severity level in `0..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcneSeverity(u8);

impl AcneSeverity {
    pub const MAX: u8 = 5;

    /// Lower bounds of severities 1..=5, as blemish density percentages
    const BANDS: [f64; 5] = [10.0, 40.0, 55.0, 75.0, 90.0];

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    /// Bucket a normalized blemish density (percent of pixels) into a level.
    /// Bands are right-open: exactly 40.0 is level 2.
    pub fn from_density(density: f64) -> Self {
        let level = Self::BANDS.iter().filter(|&&lower| density >= lower).count();
        Self(level as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Display for AcneSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Declared skin types with a dedicated routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    Normal,
    Dry,
    Oily,
    Combination,
    Sensitive,
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        SkinType::Normal,
        SkinType::Dry,
        SkinType::Oily,
        SkinType::Combination,
        SkinType::Sensitive,
    ];

    /// Returns `None` for unrecognized names rather than failing
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|skin_type| skin_type.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkinType::Normal => "Normal",
            SkinType::Dry => "Dry",
            SkinType::Oily => "Oily",
            SkinType::Combination => "Combination",
            SkinType::Sensitive => "Sensitive",
        }
    }
}

/// Self-reported skin texture. Informational only; it does not feed weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Texture {
    #[default]
    Smooth,
    Rough,
    Bumpy,
    Uneven,
}
