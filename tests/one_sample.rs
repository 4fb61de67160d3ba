//! End-to-end behavior of the one-sample field permutation test.

use nalgebra::{DMatrix, DVector};
use upcross::statistics::{percentile, sign_distribution};
use upcross::{Field, Mode, Observations, PermutationTest};

/// Six observations over twelve positions: a strong, consistent bump at
/// positions 4..=7, zero-mean variation everywhere (so the no-effect part
/// of the domain stays quiet while the bump produces a huge t-statistic).
fn bump_observations() -> (Observations, Field) {
    let n = 6;
    let m = 12;
    let observations = DMatrix::from_fn(n, m, |i, j| {
        let base = if (4..8).contains(&j) { 5.0 } else { 0.0 };
        base + 0.05 * (i as f64 - 2.5) * (1.0 + 0.1 * j as f64)
    });
    let datum = DVector::zeros(m);
    (observations, datum)
}

/// Four observations arranged in near-antisymmetric pairs: the original
/// labeling has field means close to zero, while many sign relabelings
/// align the pairs and produce much larger statistics. The observed field
/// therefore never clears the critical threshold.
fn null_observations() -> (Observations, Field) {
    let rows = [
        [1.0, 2.0, 1.5],
        [-1.1, -1.9, -1.6],
        [0.9, 2.1, 1.4],
        [-1.0, -2.2, -1.45],
    ];
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    (
        DMatrix::from_row_slice(4, 3, &flat),
        DVector::zeros(3),
    )
}

#[test]
fn detects_bump_cluster_exactly() {
    let (observations, datum) = bump_observations();
    let outcome = PermutationTest::new()
        .alpha(0.05)
        .run(&observations, &datum)
        .unwrap();

    assert!(outcome.is_significant());
    let result = outcome.result();

    assert_eq!(result.metadata.n_permutations, 64);
    assert_eq!(result.clusters.len(), 1);

    let cluster = &result.clusters[0];
    assert_eq!(cluster.start, 4);
    assert_eq!(cluster.end, 7);
    assert!(cluster.integral > 0.0);

    // The original labeling produces the largest cluster integral of all
    // 64 relabelings, so the p-value bottoms out at the floor.
    assert!((result.p_floor - 1.0 / 64.0).abs() < 1e-15);
    assert_eq!(cluster.p_value, result.p_floor);
}

#[test]
fn exhaustive_reruns_are_bit_identical() {
    let (observations, datum) = bump_observations();
    let test = PermutationTest::new().alpha(0.05);

    let first = test.run(&observations, &datum).unwrap().into_result();
    let second = test.run(&observations, &datum).unwrap().into_result();

    assert_eq!(first.statistic, second.statistic);
    assert_eq!(first.critical_threshold, second.critical_threshold);
    assert_eq!(first.clusters.len(), second.clusters.len());
    for (a, b) in first.clusters.iter().zip(&second.clusters) {
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
        assert_eq!(a.integral, b.integral);
        assert_eq!(a.p_value, b.p_value);
    }
}

#[test]
fn threshold_covers_primary_distribution() {
    let (observations, datum) = bump_observations();
    let alpha = 0.05;
    let outcome = PermutationTest::new()
        .alpha(alpha)
        .run(&observations, &datum)
        .unwrap();
    let threshold = outcome.result().critical_threshold;

    // Rebuild the primary distribution the engine saw and check the
    // threshold sits where a linear-interpolation percentile must: at
    // least floor((1-alpha)*N) samples at or below it.
    let mut y = observations.clone();
    for i in 0..y.nrows() {
        for j in 0..y.ncols() {
            y[(i, j)] -= datum[j];
        }
    }
    let primary = sign_distribution(&y, Mode::Exhaustive, 0, 0, |t| {
        t.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()))
    });
    let covered = primary.iter().filter(|&&v| v <= threshold).count();
    let required = ((1.0 - alpha) * primary.len() as f64).floor() as usize;
    assert!(covered >= required, "{covered} < {required}");

    // And the same values run through the percentile routine reproduce
    // the engine's threshold exactly.
    let mut sorted = primary;
    let recomputed = percentile(&mut sorted, 1.0 - alpha);
    assert_eq!(recomputed, threshold);
}

#[test]
fn threshold_grows_as_alpha_shrinks() {
    let (observations, datum) = bump_observations();

    let mut previous = f64::NEG_INFINITY;
    for alpha in [0.2, 0.05, 0.01] {
        let outcome = PermutationTest::new()
            .alpha(alpha)
            .run(&observations, &datum)
            .unwrap();
        let threshold = outcome.result().critical_threshold;
        assert!(threshold >= previous);
        previous = threshold;
    }
}

#[test]
fn null_data_yields_no_cluster() {
    let (observations, datum) = null_observations();
    let outcome = PermutationTest::new()
        .alpha(0.05)
        .run(&observations, &datum)
        .unwrap();

    assert!(!outcome.is_significant());
    let result = outcome.result();
    assert!(result.clusters.is_empty());
    assert_eq!(result.metadata.n_permutations, 16);
    assert!((result.p_floor - 1.0 / 16.0).abs() < 1e-15);
    assert!(result.statistic.iter().all(|v| v.abs() <= result.critical_threshold));
}

#[test]
fn two_by_two_threshold_is_closed_form() {
    // Observations [[1,2],[3,4]] against a zero datum: t = [2, 3]. The
    // four sign relabelings give max-|t| values {3, 0.5, 0.5, 3}, whose
    // 95th percentile is exactly 3, which the observed field only ties,
    // so no cluster survives the strict threshold.
    let observations = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let datum = DVector::from_vec(vec![0.0, 0.0]);

    let outcome = PermutationTest::new().run(&observations, &datum).unwrap();
    assert!(!outcome.is_significant());

    let result = outcome.result();
    assert!((result.critical_threshold - 3.0).abs() < 1e-12);
    assert!((result.statistic[0] - 2.0).abs() < 1e-12);
    assert!((result.statistic[1] - 3.0).abs() < 1e-12);
}

#[test]
fn monte_carlo_is_seed_reproducible() {
    let (observations, datum) = bump_observations();

    let run = |seed: u64| {
        PermutationTest::new()
            .monte_carlo(500, seed)
            .run(&observations, &datum)
            .unwrap()
            .into_result()
    };

    let a = run(7);
    let b = run(7);
    assert_eq!(a.critical_threshold, b.critical_threshold);
    assert_eq!(a.clusters.len(), b.clusters.len());
    for (x, y) in a.clusters.iter().zip(&b.clusters) {
        assert_eq!(x.integral, y.integral);
        assert_eq!(x.p_value, y.p_value);
    }

    assert_eq!(a.metadata.mode, Mode::MonteCarlo);
    assert_eq!(a.metadata.n_permutations, 500);
    assert_eq!(a.metadata.seed, 7);
    assert!((a.p_floor - 1.0 / 500.0).abs() < 1e-15);
}

#[test]
fn monte_carlo_detects_the_bump_too() {
    let (observations, datum) = bump_observations();
    let outcome = PermutationTest::new()
        .monte_carlo(2_000, 3)
        .run(&observations, &datum)
        .unwrap();

    // The effect is overwhelming; sampled relabelings find it as well.
    assert!(outcome.is_significant());
    let cluster = &outcome.result().clusters[0];
    assert_eq!(cluster.start, 4);
    assert_eq!(cluster.end, 7);
}

#[test]
fn p_values_never_fall_below_floor() {
    let (observations, datum) = bump_observations();
    for alpha in [0.01, 0.05, 0.2] {
        let outcome = PermutationTest::new()
            .alpha(alpha)
            .run(&observations, &datum)
            .unwrap();
        let result = outcome.result();
        for cluster in &result.clusters {
            assert!(cluster.p_value >= result.p_floor);
            assert!(cluster.p_value <= 1.0);
        }
    }
}

#[test]
fn convenience_ttest_matches_builder() {
    let (observations, datum) = bump_observations();
    let via_fn = upcross::ttest(&observations, &datum, 0.05)
        .unwrap()
        .into_result();
    let via_builder = PermutationTest::new()
        .alpha(0.05)
        .run(&observations, &datum)
        .unwrap()
        .into_result();

    assert_eq!(via_fn.statistic, via_builder.statistic);
    assert_eq!(via_fn.critical_threshold, via_builder.critical_threshold);
}
