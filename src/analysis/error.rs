use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("failed to load face model: {0}")]
    FaceModel(String),
}
