//! Percentile computation with linear interpolation.
//!
//! Uses the "R-7" definition (the numpy and R default), so critical
//! thresholds derived from the primary permutation distribution match the
//! values those environments report for the same samples.

/// Compute the percentile at probability `p` from a mutable slice.
///
/// Uses `select_nth_unstable_by()` for O(n) expected time; the slice is
/// partially reordered as a side effect. Infinities order correctly via
/// `f64::total_cmp`, and interpolation between two infinite (or equal)
/// neighbors short-circuits to the lower value so no NaN is manufactured.
///
/// # Arguments
///
/// * `data` - Mutable slice of distribution samples (partially reordered)
/// * `p` - Probability in [0, 1]
///
/// # Panics
///
/// Panics if `data` is empty or `p` is outside [0, 1].
pub fn percentile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute percentile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Percentile probability must be in [0, 1]"
    );

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    // R-7: h = (n-1)*p, interpolate between floor(h) and floor(h)+1
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

    let upper_min = upper
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(lower);

    // inf - inf would be NaN; equal or non-finite neighbors need no
    // interpolation
    if lower == upper_min || !lower.is_finite() {
        return lower;
    }

    lower + h_frac * (upper_min - lower)
}
