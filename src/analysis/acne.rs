use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use imageproc::{
    distance_transform::Norm,
    filter::{bilateral_filter, separable_filter_equal},
    morphology::open,
};

use super::{clahe::clahe, AnalysisError};
use crate::models::AcneSeverity;

const CLAHE_CLIP_LIMIT: f32 = 2.0;
const CLAHE_GRID: u32 = 8;

const BILATERAL_DIAMETER: u32 = 9;
const BILATERAL_SIGMA_COLOR: f32 = 75.0;
const BILATERAL_SIGMA_SPACE: f32 = 75.0;

const DOG_FINE_KERNEL: u32 = 5;
const DOG_COARSE_KERNEL: u32 = 9;

const THRESHOLD_BLOCK_SIZE: u32 = 11;
const THRESHOLD_OFFSET: i16 = 2;

const FOREGROUND: u8 = 255;

/// Outcome of a successful blemish scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcneReport {
    /// Percentage of pixels classified as blemish-like
    pub density: f64,
    pub severity: AcneSeverity,
}

/// Run the blemish detection pipeline and report density and severity.
///
/// Steps run in a fixed order: grayscale, CLAHE, bilateral smoothing,
/// difference of Gaussians, inverted adaptive Gaussian threshold, 3×3 opening.
pub fn score_acne(image: &DynamicImage) -> Result<AcneReport, AnalysisError> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalysisError::ZeroDimensions);
    }

    let enhanced = clahe(&gray, CLAHE_CLIP_LIMIT, CLAHE_GRID);
    let smoothed = bilateral_filter(
        &enhanced,
        BILATERAL_DIAMETER,
        BILATERAL_SIGMA_COLOR,
        BILATERAL_SIGMA_SPACE,
    );

    let fine = blur(&smoothed, DOG_FINE_KERNEL);
    let coarse = blur(&smoothed, DOG_COARSE_KERNEL);
    let dog = difference(&fine, &coarse);

    let mask = adaptive_threshold_inv(&dog, THRESHOLD_BLOCK_SIZE, THRESHOLD_OFFSET);
    let cleaned = open(&mask, Norm::LInf, 1);

    let foreground = cleaned.pixels().filter(|p| p.0[0] == FOREGROUND).count();
    let total = (width as u64 * height as u64) as f64;
    let density = foreground as f64 / total * 100.0;

    Ok(AcneReport {
        density,
        severity: AcneSeverity::from_density(density),
    })
}

/// Severity with the fail-safe policy: any scoring error yields level 0.
pub fn detect_acne_severity(image: &DynamicImage) -> AcneSeverity {
    match score_acne(image) {
        Ok(report) => report.severity,
        Err(e) => {
            tracing::warn!(error = %e, "Acne scoring failed, falling back to severity 0");
            AcneSeverity::default()
        }
    }
}

/// Gaussian sigma implied by an odd kernel size when none is given
fn kernel_sigma(kernel_size: u32) -> f32 {
    0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// One-dimensional Gaussian weights spanning exactly `kernel_size` taps,
/// normalized to sum to 1.
fn gaussian_kernel(kernel_size: u32) -> Vec<f32> {
    let sigma = kernel_sigma(kernel_size);
    let center = (kernel_size as f32 - 1.0) / 2.0;
    let weights: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Square Gaussian blur of odd size `kernel_size`, computed in f32 and
/// rounded back to 8 bits. Borders replicate the edge pixel.
fn blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    let as_float: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(width, height, |x, y| Luma([image.get_pixel(x, y).0[0] as f32]));
    let blurred = separable_filter_equal(&as_float, &gaussian_kernel(kernel_size));

    GrayImage::from_fn(width, height, |x, y| {
        Luma([blurred.get_pixel(x, y).0[0].round().clamp(0.0, 255.0) as u8])
    })
}

/// Pixel-wise `a - b` on 8-bit values, wrapping on underflow
fn difference(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y).0[0].wrapping_sub(b.get_pixel(x, y).0[0])])
    })
}

/// Marks pixels at least `offset` below their Gaussian-weighted neighborhood
/// mean as foreground.
fn adaptive_threshold_inv(image: &GrayImage, block_size: u32, offset: i16) -> GrayImage {
    let local_mean = blur(image, block_size);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let value = image.get_pixel(x, y).0[0] as i16;
        let mean = local_mean.get_pixel(x, y).0[0] as i16;
        if value - mean > -offset {
            Luma([0])
        } else {
            Luma([FOREGROUND])
        }
    })
}
