//! Sampling and order statistics shared by the Monte Carlo runners.

use rand::Rng;

/// Zero-based index of the nearest-rank `percentile` in a sorted slice of `len`.
///
/// For 200 samples the 10th percentile is index 19 and the 90th is 179.
pub fn nearest_rank_index(len: usize, percentile: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let rank = (len * percentile).div_ceil(100);
    rank.saturating_sub(1).min(len - 1)
}

/// Nearest-rank percentile of an ascending slice.
pub fn percentile(sorted: &[f64], percentile: usize) -> Option<f64> {
    sorted.get(nearest_rank_index(sorted.len(), percentile)).copied()
}

/// Draws uniformly from `[center * (1 - spread), center * (1 + spread)]`.
///
/// Bounds are ordered first, so a negative center still spans the same
/// magnitudes on its own side of zero. A zero-width or non-finite range
/// returns `center`.
pub fn sample_around<R: Rng + ?Sized>(rng: &mut R, center: f64, spread: f64) -> f64 {
    let a = center * (1.0 - spread);
    let b = center * (1.0 + spread);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    if !(low < high) || !(high - low).is_finite() {
        return center;
    }
    rng.random_range(low..=high)
}
