//! Pointwise t-statistic fields.
//!
//! Both the observed statistic field and every permuted replicate are
//! computed through the same routines, so relabeled fields match the
//! original bit-for-bit when the relabeling is the identity.

use nalgebra::{DMatrix, DVector};

/// Compute the one-sample t-statistic field of sign-relabeled observations.
///
/// For each domain position j the statistic is
///
/// ```text
/// t_j = mean(s_i * y_ij) / std(s_i * y_ij, ddof=1) * sqrt(n)
/// ```
///
/// where `y` holds datum-corrected observations (one row per observation)
/// and `signs` assigns +1.0 or -1.0 to each row. Passing all +1.0 yields the
/// observed statistic field.
///
/// # Zero variance
///
/// A position where all signed values coincide has zero sample variance and
/// the statistic propagates as signed infinity (IEEE division). Callers
/// validate the identity relabeling up front; permuted relabelings may hit
/// this legitimately and the infinities flow through the max/percentile
/// machinery deterministically.
///
/// # Panics
///
/// Panics if `signs.len() != y.nrows()` or `y.nrows() < 2`.
pub fn t_statistic_signed(y: &DMatrix<f64>, signs: &[f64]) -> DVector<f64> {
    let n = y.nrows();
    let m = y.ncols();
    assert_eq!(signs.len(), n, "one sign per observation");
    assert!(n >= 2, "sample standard deviation needs n >= 2");

    let sqrt_n = (n as f64).sqrt();
    let mut t = DVector::zeros(m);

    for j in 0..m {
        let mut sum = 0.0;
        for i in 0..n {
            sum += signs[i] * y[(i, j)];
        }
        let mean = sum / n as f64;

        let mut ss = 0.0;
        for i in 0..n {
            let d = signs[i] * y[(i, j)] - mean;
            ss += d * d;
        }
        let std = (ss / (n - 1) as f64).sqrt();

        t[j] = mean / std * sqrt_n;
    }

    t
}

/// Compute the two-sample t-statistic field for a group assignment.
///
/// Rows of `y` where `in_group_a` is true form group A, the rest group B.
/// For each domain position j:
///
/// ```text
/// t_j = (meanA_j - meanB_j) / (s_j * sqrt(1/nA + 1/nB))
/// s_j = sqrt(0.5 * (stdA_j^2 + stdB_j^2))
/// ```
///
/// with both standard deviations using ddof=1. The same zero-variance
/// propagation policy as [`t_statistic_signed`] applies.
///
/// # Panics
///
/// Panics if `in_group_a.len() != y.nrows()` or either group has fewer than
/// two members.
pub fn t_statistic_two_sample(y: &DMatrix<f64>, in_group_a: &[bool]) -> DVector<f64> {
    let n = y.nrows();
    let m = y.ncols();
    assert_eq!(in_group_a.len(), n, "one group label per observation");

    let n_a = in_group_a.iter().filter(|&&a| a).count();
    let n_b = n - n_a;
    assert!(n_a >= 2 && n_b >= 2, "each group needs at least 2 members");

    let scale = (1.0 / n_a as f64 + 1.0 / n_b as f64).sqrt();
    let mut t = DVector::zeros(m);

    for j in 0..m {
        let mut sum_a = 0.0;
        let mut sum_b = 0.0;
        for i in 0..n {
            if in_group_a[i] {
                sum_a += y[(i, j)];
            } else {
                sum_b += y[(i, j)];
            }
        }
        let mean_a = sum_a / n_a as f64;
        let mean_b = sum_b / n_b as f64;

        let mut ss_a = 0.0;
        let mut ss_b = 0.0;
        for i in 0..n {
            if in_group_a[i] {
                let d = y[(i, j)] - mean_a;
                ss_a += d * d;
            } else {
                let d = y[(i, j)] - mean_b;
                ss_b += d * d;
            }
        }
        let var_a = ss_a / (n_a - 1) as f64;
        let var_b = ss_b / (n_b - 1) as f64;
        let pooled = (0.5 * (var_a + var_b)).sqrt();

        t[j] = (mean_a - mean_b) / (pooled * scale);
    }

    t
}

/// First domain position of `y` whose identity-relabeling sample variance is
/// zero, if any.
///
/// Used for fail-fast validation before any permutation work begins.
pub fn first_degenerate_position(y: &DMatrix<f64>) -> Option<usize> {
    let n = y.nrows();
    for j in 0..y.ncols() {
        let mean = (0..n).map(|i| y[(i, j)]).sum::<f64>() / n as f64;
        let ss: f64 = (0..n).map(|i| (y[(i, j)] - mean).powi(2)).sum();
        if ss == 0.0 {
            return Some(j);
        }
    }
    None
}

/// First domain position where both groups have zero sample variance, if
/// any.
///
/// The pooled standard deviation vanishes exactly when both group variances
/// do, making the two-sample statistic undefined there.
pub fn first_degenerate_grouped(y: &DMatrix<f64>, in_group_a: &[bool]) -> Option<usize> {
    let n = y.nrows();
    debug_assert_eq!(in_group_a.len(), n);

    for j in 0..y.ncols() {
        let mut degenerate = true;
        for &group_a in [true, false].iter() {
            let rows: Vec<usize> = (0..n).filter(|&i| in_group_a[i] == group_a).collect();
            let mean = rows.iter().map(|&i| y[(i, j)]).sum::<f64>() / rows.len() as f64;
            let ss: f64 = rows.iter().map(|&i| (y[(i, j)] - mean).powi(2)).sum();
            if ss != 0.0 {
                degenerate = false;
                break;
            }
        }
        if degenerate {
            return Some(j);
        }
    }
    None
}
