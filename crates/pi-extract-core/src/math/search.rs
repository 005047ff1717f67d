//! Search reductions across the frequency axis
//!
//! These are the only operations that combine samples from different
//! frequencies. Both resolve ties toward the lowest index.

/// Index of the largest value, skipping NaN entries.
///
/// Returns `None` when the slice is empty or holds only NaN.
pub fn argmax_ignore_nan(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |b| v > values[b]) {
            best = Some(i);
        }
    }
    best
}

/// Index of the sample closest to `target`.
///
/// Returns `None` for an empty grid.
pub fn nearest_index(grid: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &g) in grid.iter().enumerate() {
        let dist = (g - target).abs();
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}
