use image::DynamicImage;

use super::{
    color::rgb_to_lab8,
    face_detector::{FaceBounds, FaceDetector},
};

/// Pixels with an A channel at or below this are not treated as skin
const SKIN_MIN_A: u8 = 120;

/// Pixels with a B channel at or below this are not treated as skin
const SKIN_MIN_B: u8 = 130;

/// Face rectangle clamped to the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Skin pixels isolated from the first detected face
#[derive(Debug, Clone)]
pub struct FaceRegion {
    pub rect: FaceRect,
    /// 8-bit LAB triples that passed the chrominance mask
    pub skin_pixels: Vec<[u8; 3]>,
}

/// Locate a face and collect the pixels inside it that look like skin.
///
/// Returns `None` when no face of at least `min_face_size` is found or when
/// the chrominance mask keeps no pixels. Both are normal outcomes.
pub fn extract_skin_region(
    image: &DynamicImage,
    detector: &dyn FaceDetector,
    min_face_size: u32,
) -> Option<FaceRegion> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let faces = detector.detect(gray.as_raw(), width, height);
    let Some(face) = faces
        .iter()
        .find(|f| f.width >= min_face_size as f64 && f.height >= min_face_size as f64)
    else {
        tracing::debug!(detected = faces.len(), "No face large enough for tone analysis");
        return None;
    };

    let rect = clamp_to_image(face, width, height)?;
    let face_rgb = image.crop_imm(rect.x, rect.y, rect.width, rect.height).to_rgb8();

    let skin_pixels: Vec<[u8; 3]> = face_rgb
        .pixels()
        .map(|p| rgb_to_lab8(p.0))
        .filter(|&[_, a, b]| a > SKIN_MIN_A && b > SKIN_MIN_B)
        .collect();

    tracing::debug!(
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        skin_pixels = skin_pixels.len(),
        "Face region extracted"
    );

    if skin_pixels.is_empty() {
        return None;
    }

    Some(FaceRegion { rect, skin_pixels })
}

fn clamp_to_image(face: &FaceBounds, width: u32, height: u32) -> Option<FaceRect> {
    let x = face.x.max(0.0).floor() as u32;
    let y = face.y.max(0.0).floor() as u32;
    if x >= width || y >= height {
        return None;
    }

    let right = (face.x + face.width).round().clamp(0.0, width as f64) as u32;
    let bottom = (face.y + face.height).round().clamp(0.0, height as f64) as u32;
    if right <= x || bottom <= y {
        return None;
    }

    Some(FaceRect {
        x,
        y,
        width: right - x,
        height: bottom - y,
    })
}
