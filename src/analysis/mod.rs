//! Photo analysis: face-based skin tone classification and acne severity scoring.

use std::sync::Arc;

use image::DynamicImage;

use crate::models::{FaceSummary, SkinAnalysis};

pub mod acne;
mod clahe;
pub mod color;
mod error;
pub mod face_detector;
pub mod face_region;
#[cfg(feature = "rustface")]
pub mod rustface_backend;
pub mod tone;

pub use acne::{detect_acne_severity, score_acne, AcneReport};
pub use error::AnalysisError;
pub use face_detector::{DetectionParams, FaceBounds, FaceDetector};
pub use face_region::{extract_skin_region, FaceRegion};
#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceDetector;
pub use tone::{classify_tone, detect_skin_tone};

/// Decode raw JPEG/PNG/WebP bytes into an image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AnalysisError> {
    let image = image::load_from_memory(bytes).map_err(|e| AnalysisError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(AnalysisError::ZeroDimensions);
    }
    Ok(image)
}

/// Runs tone and acne analysis on one photo.
///
/// Without a face detector, tone classification is skipped and only the acne
/// score is produced.
#[derive(Clone, Default)]
pub struct SkinAnalyzer {
    detector: Option<Arc<dyn FaceDetector>>,
    params: DetectionParams,
}

impl SkinAnalyzer {
    pub fn new(detector: Option<Arc<dyn FaceDetector>>, params: DetectionParams) -> Self {
        Self { detector, params }
    }

    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    /// Analyze a decoded image. Never fails: missing faces and scoring errors
    /// are reported in the result.
    pub fn analyze(&self, image: &DynamicImage) -> SkinAnalysis {
        let region = self
            .detector
            .as_deref()
            .and_then(|detector| extract_skin_region(image, detector, self.params.min_face_size));

        let skin_tone = region.as_ref().and_then(|r| detect_skin_tone(&r.skin_pixels));
        let face = region.as_ref().map(|r| FaceSummary {
            x: r.rect.x,
            y: r.rect.y,
            width: r.rect.width,
            height: r.rect.height,
            skin_pixel_count: r.skin_pixels.len(),
        });

        let (acne_level, acne_scoring_failed) = match score_acne(image) {
            Ok(report) => {
                tracing::debug!(density = report.density, "Blemish density computed");
                (report.severity, false)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Acne scoring failed, falling back to severity 0");
                (Default::default(), true)
            }
        };

        tracing::info!(
            skin_tone = ?skin_tone,
            acne_level = acne_level.level(),
            face_found = face.is_some(),
            "Skin analysis completed"
        );

        SkinAnalysis {
            skin_tone,
            face,
            acne_level,
            acne_scoring_failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::face_region::tests::{face, portrait, FixedDetector};
    use crate::models::SkinTone;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn analyzer_with(faces: Vec<FaceBounds>) -> SkinAnalyzer {
        SkinAnalyzer::new(Some(Arc::new(FixedDetector(faces))), DetectionParams::default())
    }

    #[test]
    fn test_decode_png_bytes() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(4, 3))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let image = decode_image(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(AnalysisError::Decode(_))
        ));
    }

    #[test]
    fn test_analyze_detects_tone_for_face() {
        let analysis = analyzer_with(vec![face(50.0, 50.0, 120.0)]).analyze(&portrait());
        assert!(analysis.skin_tone.is_some());
        let summary = analysis.face.unwrap();
        assert_eq!(summary.width, 120);
        assert_eq!(summary.skin_pixel_count, 120 * 120);
        assert!(!analysis.acne_scoring_failed);
    }

    #[test]
    fn test_analyze_without_face_skips_tone() {
        let analysis = analyzer_with(vec![]).analyze(&portrait());
        assert_eq!(analysis.skin_tone, None);
        assert_eq!(analysis.face, None);
    }

    #[test]
    fn test_analyze_without_detector_still_scores_acne() {
        let analysis = SkinAnalyzer::default().analyze(&portrait());
        assert_eq!(analysis.skin_tone, None);
        assert!(!analysis.acne_scoring_failed);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyzer = analyzer_with(vec![face(50.0, 50.0, 120.0)]);
        let image = portrait();
        let first = analyzer.analyze(&image);
        let second = analyzer.analyze(&image);
        assert_eq!(first, second);
    }

    #[test]
    fn test_uniform_face_classifies_to_nearest_anchor() {
        let region_pixel = color::rgb_to_lab8([198, 134, 100]);
        let expected = classify_tone(region_pixel.map(f64::from));
        let analysis = analyzer_with(vec![face(50.0, 50.0, 120.0)]).analyze(&portrait());
        assert_eq!(analysis.skin_tone, Some(expected));
        assert_ne!(expected, SkinTone::Light);
    }
}
