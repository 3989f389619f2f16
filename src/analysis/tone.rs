use rand::{rngs::StdRng, seq::index, SeedableRng};

use crate::models::SkinTone;

/// Pinned seed for centroid initialization, so identical pixels always yield
/// identical centroids
pub const CLUSTER_SEED: u64 = 42;

const MAX_ITERATIONS: usize = 300;
const CONVERGENCE_TOLERANCE: f64 = 1e-4;

/// Lloyd's k-means over 3-channel points.
///
/// Returns the centroids ordered by cluster size, largest first. With `k == 1`
/// the single centroid is the component-wise mean.
pub fn kmeans(points: &[[u8; 3]], k: usize, seed: u64) -> Vec<[f64; 3]> {
    let k = k.min(points.len());
    if k == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<[f64; 3]> = index::sample(&mut rng, points.len(), k)
        .into_iter()
        .map(|i| to_f64(points[i]))
        .collect();
    let mut sizes = vec![0usize; k];

    for _ in 0..MAX_ITERATIONS {
        let mut sums = vec![[0.0f64; 3]; k];
        sizes.iter_mut().for_each(|s| *s = 0);

        for point in points {
            let p = to_f64(*point);
            let nearest = nearest_index(&centroids, p);
            sums[nearest][0] += p[0];
            sums[nearest][1] += p[1];
            sums[nearest][2] += p[2];
            sizes[nearest] += 1;
        }

        let mut shift = 0.0;
        for (c, (sum, &size)) in centroids.iter_mut().zip(sums.iter().zip(&sizes)) {
            // Empty clusters keep their previous centroid
            if size == 0 {
                continue;
            }
            let n = size as f64;
            let updated = [sum[0] / n, sum[1] / n, sum[2] / n];
            shift += squared_distance(*c, updated);
            *c = updated;
        }

        if shift <= CONVERGENCE_TOLERANCE {
            break;
        }
    }

    let mut ranked: Vec<([f64; 3], usize)> = centroids.into_iter().zip(sizes).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(c, _)| c).collect()
}

/// Representative color of a skin pixel set
pub fn dominant_color(pixels: &[[u8; 3]]) -> Option<[f64; 3]> {
    kmeans(pixels, 1, CLUSTER_SEED).into_iter().next()
}

/// Nearest tone anchor by Euclidean distance; earlier tones win ties
pub fn classify_tone(color: [f64; 3]) -> SkinTone {
    let mut best = SkinTone::ALL[0];
    let mut best_distance = f64::INFINITY;

    for tone in SkinTone::ALL {
        let anchor = tone.anchor().map(f64::from);
        let distance = squared_distance(color, anchor);
        if distance < best_distance {
            best = tone;
            best_distance = distance;
        }
    }

    best
}

/// Classify a set of LAB skin pixels. `None` for an empty set.
pub fn detect_skin_tone(pixels: &[[u8; 3]]) -> Option<SkinTone> {
    dominant_color(pixels).map(classify_tone)
}

fn nearest_index(centroids: &[[f64; 3]], point: [f64; 3]) -> usize {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, squared_distance(*c, point)))
        .fold((0, f64::INFINITY), |best, current| {
            if current.1 < best.1 {
                current
            } else {
                best
            }
        })
        .0
}

fn squared_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

fn to_f64(p: [u8; 3]) -> [f64; 3] {
    [p[0] as f64, p[1] as f64, p[2] as f64]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cluster_is_mean() {
        let pixels = [[100, 130, 140], [110, 140, 150], [120, 150, 160]];
        let color = dominant_color(&pixels).unwrap();
        assert!((color[0] - 110.0).abs() < 1e-9);
        assert!((color[1] - 140.0).abs() < 1e-9);
        assert!((color[2] - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pixels_have_no_tone() {
        assert_eq!(detect_skin_tone(&[]), None);
    }

    #[test]
    fn test_anchor_colors_classify_to_themselves() {
        for tone in SkinTone::ALL {
            assert_eq!(classify_tone(tone.anchor().map(f64::from)), tone);
        }
    }

    #[test]
    fn test_equidistant_color_resolves_to_first_defined() {
        // Midpoint between Light and Medium anchors
        assert_eq!(classify_tone([175.0, 129.0, 134.0]), SkinTone::Light);
        // Midpoint between Tan and Dark anchors
        assert_eq!(classify_tone([95.0, 155.0, 165.0]), SkinTone::Tan);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let pixels: Vec<[u8; 3]> = (0..500u32)
            .map(|i| [(120 + i % 40) as u8, (135 + i % 11) as u8, (140 + i % 17) as u8])
            .collect();
        let first = detect_skin_tone(&pixels);
        for _ in 0..5 {
            assert_eq!(detect_skin_tone(&pixels), first);
        }
    }

    #[test]
    fn test_kmeans_separates_two_clusters() {
        let mut pixels = vec![[50u8, 170, 180]; 30];
        pixels.extend(vec![[200u8, 128, 128]; 10]);
        let centroids = kmeans(&pixels, 2, CLUSTER_SEED);
        assert_eq!(centroids.len(), 2);
        assert_eq!(classify_tone(centroids[0]), SkinTone::Deep);
        assert_eq!(classify_tone(centroids[1]), SkinTone::Light);
    }
}
