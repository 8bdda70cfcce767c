// File: crates/insight-chart/src/grid.rs
// Summary: Simple grid/tick layout helpers.

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Indices `0, step, 2*step, ...` below `count`, with `step` chosen so that at
/// most `max_shown` indices come back.
pub fn strided_indices(count: usize, max_shown: usize) -> impl Iterator<Item = usize> {
    let step = count.div_ceil(max_shown.max(1)).max(1);
    (0..count).step_by(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(0.0, 8.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn stride_caps_count() {
        assert_eq!(strided_indices(12, 6).collect::<Vec<_>>(), vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(strided_indices(13, 6).collect::<Vec<_>>(), vec![0, 3, 6, 9, 12]);
        assert_eq!(strided_indices(4, 6).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(strided_indices(0, 6).count(), 0);
    }
}
