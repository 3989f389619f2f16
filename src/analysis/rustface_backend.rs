use std::{fs::File, io::BufReader, path::Path};

use super::{
    face_detector::{DetectionParams, FaceBounds, FaceDetector},
    AnalysisError,
};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
pub struct RustfaceDetector {
    model: rustface::Model,
    params: DetectionParams,
}

impl RustfaceDetector {
    /// Load a SeetaFace frontal model from disk.
    pub fn from_file(path: impl AsRef<Path>, params: DetectionParams) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AnalysisError::FaceModel(format!("{}: {}", path.display(), e)))?;
        let model = rustface::read_model(BufReader::new(file))
            .map_err(|e| AnalysisError::FaceModel(format!("{}: {}", path.display(), e)))?;

        Ok(Self { model, params })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.params.min_face_size);
        detector.set_score_thresh(self.params.score_threshold);
        // rustface shrinks by a factor < 1 per pyramid level
        detector.set_pyramid_scale_factor(1.0 / self.params.scale_factor);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}
