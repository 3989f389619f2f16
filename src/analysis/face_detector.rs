/// Bounding box of a detected face within an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels).
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels).
    pub y: f64,
    /// Width of the bounding box (pixels).
    pub width: f64,
    /// Height of the bounding box (pixels).
    pub height: f64,
    /// Detection confidence score.
    pub confidence: f64,
}

/// Pluggable frontal face detector.
///
/// Backends return faces in their own order; the skin extractor uses the first
/// one that meets the minimum size and never re-ranks.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds>;
}

/// Tuning shared by detector backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Image pyramid step between scales (1.1 = each level 10% smaller).
    pub scale_factor: f32,
    /// Smallest face side, in pixels, that counts as a detection.
    pub min_face_size: u32,
    /// Minimum classifier score a window needs to be reported.
    pub score_threshold: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_face_size: 100,
            score_threshold: 2.0,
        }
    }
}
