//! Main `PermutationTest` entry point and builder.

use std::time::Instant;

use nalgebra::DMatrix;

use crate::config::Config;
use crate::error::FieldError;
use crate::result::{Cluster, Metadata, Outcome, TestResult};
use crate::statistics::{
    cluster_integral, first_degenerate_grouped, first_degenerate_position, label_runs,
    max_cluster_integral, partition_distribution, percentile, sign_distribution,
    t_statistic_signed, t_statistic_two_sample,
};
use crate::types::{Field, Mode, Observations};

/// Observation count beyond which exhaustive enumeration gets expensive
/// enough to warn about (2^20 ≈ 1M statistic-field recomputations per pass).
const EXHAUSTIVE_WARN_OBSERVATIONS: usize = 20;

/// Main entry point for field permutation tests.
///
/// Use the builder pattern to configure and run tests.
///
/// # Example
///
/// ```ignore
/// use upcross::PermutationTest;
///
/// // observations: n x m matrix, one simulated field per row
/// // datum: length-m reference field
/// let outcome = PermutationTest::new()
///     .alpha(0.05)
///     .run(&observations, &datum)?;
///
/// for cluster in &outcome.result().clusters {
///     println!(
///         "positions {}..={}: p = {:.4}",
///         cluster.start, cluster.end, cluster.p_value
///     );
/// }
/// ```
///
/// The default mode enumerates all relabelings exhaustively, which is
/// deterministic and exact but grows as 2ⁿ (one-sample) or C(n, nA)
/// (two-sample). For larger observation counts, switch to sampled
/// enumeration with [`PermutationTest::monte_carlo`].
#[derive(Debug, Clone, Default)]
pub struct PermutationTest {
    config: Config,
}

impl PermutationTest {
    /// Create with default configuration (alpha 0.05, exhaustive mode).
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the Type-I error rate for the critical threshold.
    ///
    /// # Panics
    ///
    /// Panics unless `alpha` is in (0, 1).
    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha < 1.0,
            "alpha must be in the open interval (0, 1)"
        );
        self.config.alpha = alpha;
        self
    }

    /// Enumerate every relabeling (the default).
    pub fn exhaustive(mut self) -> Self {
        self.config.mode = Mode::Exhaustive;
        self
    }

    /// Sample `iterations` random relabelings from a PRNG seeded with
    /// `seed`.
    ///
    /// The seed is required here rather than optional so sampled runs are
    /// always reproducible.
    pub fn monte_carlo(mut self, iterations: usize, seed: u64) -> Self {
        assert!(iterations > 0, "Monte Carlo mode needs at least 1 iteration");
        self.config.mode = Mode::MonteCarlo;
        self.config.iterations = iterations;
        self.config.seed = seed;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a one-sample test of `observations` against a `datum` field.
    ///
    /// For each domain position the statistic is
    /// `mean(obs - datum) / std(obs - datum, ddof=1) * sqrt(n)`; the
    /// critical threshold is the `100*(1-alpha)`-th percentile of the
    /// max-|t| distribution over sign relabelings, and each surviving
    /// cluster's p-value comes from the max-cluster-integral distribution
    /// over the same relabelings.
    ///
    /// # Errors
    ///
    /// All input validation happens before any permutation work:
    /// - [`FieldError::InvalidShape`] when `datum` length disagrees with the
    ///   observation columns, or the domain is empty
    /// - [`FieldError::InsufficientObservations`] for fewer than 2 rows
    /// - [`FieldError::DegenerateVariance`] when the observed
    ///   datum-corrected field has zero variance at some position
    pub fn run(&self, observations: &Observations, datum: &Field) -> Result<Outcome, FieldError> {
        let start = Instant::now();
        let n = observations.nrows();
        let m = observations.ncols();

        if m == 0 {
            return Err(FieldError::InvalidShape {
                expected: 1,
                found: 0,
                context: "observations",
            });
        }
        if datum.len() != m {
            return Err(FieldError::InvalidShape {
                expected: m,
                found: datum.len(),
                context: "datum",
            });
        }
        if n < 2 {
            return Err(FieldError::InsufficientObservations {
                found: n,
                required: 2,
            });
        }

        // Datum-corrected observations
        let mut y = observations.clone();
        for i in 0..n {
            for j in 0..m {
                y[(i, j)] -= datum[j];
            }
        }

        if let Some(position) = first_degenerate_position(&y) {
            return Err(FieldError::DegenerateVariance { position });
        }

        self.warn_if_exhaustive_expensive(n);

        let identity = vec![1.0; n];
        let t0 = t_statistic_signed(&y, &identity);

        let mode = self.config.mode;
        let iterations = self.config.iterations;
        let seed = self.config.seed;

        // Primary distribution: max |t| per sign relabeling
        let mut primary = sign_distribution(&y, mode, iterations, seed, max_abs);
        let threshold = percentile(&mut primary, 1.0 - self.config.alpha);

        // Secondary distribution: max cluster integral per sign relabeling
        let secondary = sign_distribution(&y, mode, iterations, seed, |t| {
            let abs: Vec<f64> = t.iter().map(|v| v.abs()).collect();
            max_cluster_integral(&abs, threshold)
        });

        Ok(self.assemble(t0, threshold, &secondary, n, primary.len(), start))
    }

    /// Run a two-sample test comparing `group_a` against `group_b`.
    ///
    /// The statistic is `(meanA - meanB) / (pooled_std * sqrt(1/nA + 1/nB))`
    /// with `pooled_std = sqrt(0.5*(stdA² + stdB²))`, both stds ddof=1.
    /// Exhaustive mode enumerates all C(nA+nB, nA) group assignments and
    /// requires equal group sizes; Monte Carlo mode samples random
    /// partitions and accepts unbalanced groups.
    ///
    /// # Errors
    ///
    /// In addition to the shape, count, and variance checks of
    /// [`PermutationTest::run`], returns [`FieldError::UnbalancedGroups`]
    /// for exhaustive mode with `nA != nB`.
    pub fn run_two_sample(
        &self,
        group_a: &Observations,
        group_b: &Observations,
    ) -> Result<Outcome, FieldError> {
        let start = Instant::now();
        let n_a = group_a.nrows();
        let n_b = group_b.nrows();
        let m = group_a.ncols();

        if m == 0 {
            return Err(FieldError::InvalidShape {
                expected: 1,
                found: 0,
                context: "group A",
            });
        }
        if group_b.ncols() != m {
            return Err(FieldError::InvalidShape {
                expected: m,
                found: group_b.ncols(),
                context: "group B",
            });
        }
        if n_a < 2 {
            return Err(FieldError::InsufficientObservations {
                found: n_a,
                required: 2,
            });
        }
        if n_b < 2 {
            return Err(FieldError::InsufficientObservations {
                found: n_b,
                required: 2,
            });
        }
        if self.config.mode == Mode::Exhaustive && n_a != n_b {
            return Err(FieldError::UnbalancedGroups { n_a, n_b });
        }

        let n = n_a + n_b;

        // Stack both groups, group A first; rank-0 / identity relabeling is
        // then the original grouping.
        let y = DMatrix::from_fn(n, m, |i, j| {
            if i < n_a {
                group_a[(i, j)]
            } else {
                group_b[(i - n_a, j)]
            }
        });

        let mut original: Vec<bool> = vec![false; n];
        for flag in original.iter_mut().take(n_a) {
            *flag = true;
        }

        if let Some(position) = first_degenerate_grouped(&y, &original) {
            return Err(FieldError::DegenerateVariance { position });
        }

        self.warn_if_exhaustive_expensive(n);

        let t0 = t_statistic_two_sample(&y, &original);

        let mode = self.config.mode;
        let iterations = self.config.iterations;
        let seed = self.config.seed;

        let mut primary = partition_distribution(&y, n_a, mode, iterations, seed, max_abs);
        let threshold = percentile(&mut primary, 1.0 - self.config.alpha);

        let secondary = partition_distribution(&y, n_a, mode, iterations, seed, |t| {
            let abs: Vec<f64> = t.iter().map(|v| v.abs()).collect();
            max_cluster_integral(&abs, threshold)
        });

        Ok(self.assemble(t0, threshold, &secondary, n, primary.len(), start))
    }

    /// Threshold the observed field, attach p-values, and wrap up.
    fn assemble(
        &self,
        t0: Field,
        threshold: f64,
        secondary: &[f64],
        n_observations: usize,
        n_permutations: usize,
        start: Instant,
    ) -> Outcome {
        let abs_t0: Vec<f64> = t0.iter().map(|v| v.abs()).collect();
        let p_floor = 1.0 / secondary.len() as f64;

        let clusters: Vec<Cluster> = label_runs(&abs_t0, threshold)
            .into_iter()
            .map(|run| {
                let integral = cluster_integral(&abs_t0, threshold, run);
                let exceed = secondary.iter().filter(|&&v| v > integral).count();
                let p_value = (exceed as f64 / secondary.len() as f64).max(p_floor);
                Cluster {
                    start: run.start,
                    end: run.end,
                    integral,
                    p_value,
                }
            })
            .collect();

        let result = TestResult {
            statistic: t0,
            critical_threshold: threshold,
            alpha: self.config.alpha,
            clusters,
            p_floor,
            metadata: Metadata {
                n_observations,
                domain_length: abs_t0.len(),
                mode: self.config.mode,
                n_permutations,
                seed: match self.config.mode {
                    Mode::MonteCarlo => self.config.seed,
                    Mode::Exhaustive => 0,
                },
                runtime_secs: start.elapsed().as_secs_f64(),
            },
        };

        if result.clusters.is_empty() {
            Outcome::NoSignificantCluster(result)
        } else {
            Outcome::Significant(result)
        }
    }

    fn warn_if_exhaustive_expensive(&self, n: usize) {
        if self.config.mode == Mode::Exhaustive && n > EXHAUSTIVE_WARN_OBSERVATIONS {
            eprintln!(
                "[upcross] Exhaustive enumeration over {} observations is expensive; \
                 consider .monte_carlo(iterations, seed)",
                n
            );
        }
    }
}

/// Maximum absolute value of a statistic field.
fn max_abs(t: &Field) -> f64 {
    t.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()))
}
