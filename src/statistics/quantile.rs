//! Empirical quantiles with linear interpolation.
//!
//! All functions use the "R-7" definition: the quantile at level `p` of `n`
//! sorted values sits at fractional index `h = (n - 1) * p` and interpolates
//! linearly between the two neighbouring order statistics.

/// Compute a single quantile from a mutable slice.
///
/// Uses `select_nth_unstable()` for O(n) expected time complexity.
/// The slice is partially reordered as a side effect.
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    let h = (n - 1) as f64 * p;
    let h_floor = h.floor() as usize;
    let h_frac = h - h.floor();

    if h_floor >= n - 1 {
        let (_, &mut max, _) = data.select_nth_unstable_by(n - 1, |a, b| a.total_cmp(b));
        return max;
    }

    let (_, &mut lower, upper) = data.select_nth_unstable_by(h_floor, |a, b| a.total_cmp(b));

    if h_frac == 0.0 {
        return lower;
    }

    // Smallest element of the upper partition is the next order statistic
    let upper_min = upper
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(lower);

    lower + h_frac * (upper_min - lower)
}

/// Compute a quantile from data already sorted in ascending order.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn compute_quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let h_floor = h.floor() as usize;
    let h_frac = h - h.floor();

    if h_floor >= n - 1 {
        sorted[n - 1]
    } else if h_frac == 0.0 {
        sorted[h_floor]
    } else {
        sorted[h_floor] + h_frac * (sorted[h_floor + 1] - sorted[h_floor])
    }
}

/// Compute several quantiles of the same data, sorting `buffer` once.
///
/// `buffer` is overwritten with a sorted copy of `data` so hot loops can reuse
/// one allocation across calls.
///
/// # Panics
///
/// Panics if `data` is empty or any level is outside [0, 1].
pub fn compute_quantiles_with_buffer(data: &[f64], levels: &[f64], buffer: &mut Vec<f64>) -> Vec<f64> {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");

    buffer.clear();
    buffer.extend_from_slice(data);
    buffer.sort_unstable_by(|a, b| a.total_cmp(b));

    levels
        .iter()
        .map(|&p| compute_quantile_sorted(buffer, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_quantile_median() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let median = compute_quantile(&mut data, 0.5);
        assert!((median - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_compute_quantile_extremes() {
        let mut data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let min = compute_quantile(&mut data.clone(), 0.0);
        let max = compute_quantile(&mut data, 1.0);
        assert!((min - 1.0).abs() < 1e-10);
        assert!((max - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_interpolation() {
        // h = 3 * 0.9 = 2.7 -> 3 + 0.7 * (10 - 3)
        let mut data = vec![10.0, 1.0, 3.0, 2.0];
        let q = compute_quantile(&mut data, 0.9);
        assert!((q - 7.9).abs() < 1e-10);

        let sorted = vec![1.0, 2.0, 3.0, 10.0];
        assert!((compute_quantile_sorted(&sorted, 0.9) - 7.9).abs() < 1e-10);
    }

    #[test]
    fn test_select_matches_sorted() {
        let data: Vec<f64> = vec![
            3.0, 1.0, 9.0, 2.0, 7.0, 4.0, 6.0, 8.0, 1.0, 5.0, 2.0, 9.0, 3.0, 6.0, 4.0,
        ];
        let levels = [0.01, 0.1, 0.0, 0.5, 0.9, 0.99, 1.0];
        let mut buffer = Vec::new();
        let batched = compute_quantiles_with_buffer(&data, &levels, &mut buffer);

        for (&p, &expected) in levels.iter().zip(&batched) {
            let single = compute_quantile(&mut data.clone(), p);
            assert!(
                (single - expected).abs() < 1e-10,
                "level {}: select={}, sorted={}",
                p,
                single,
                expected
            );
        }
    }

    #[test]
    fn test_quantiles_are_monotone() {
        let data: Vec<f64> = (0..200).map(|x| ((x * 37) % 23) as f64).collect();
        let levels = [0.01, 0.05, 0.1, 0.5, 0.9, 0.95, 0.99];
        let q = compute_quantiles_with_buffer(&data, &levels, &mut Vec::new());
        for w in q.windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    #[should_panic(expected = "Cannot compute quantile of empty slice")]
    fn test_empty_slice_panics() {
        let mut data: Vec<f64> = vec![];
        compute_quantile(&mut data, 0.5);
    }
}
