//! Test result types and related structures.

use serde::{Deserialize, Serialize};

use crate::types::{Field, Mode};

/// Outcome of a field permutation test.
///
/// A statistic field that never exceeds the critical threshold is a valid,
/// explicitly represented result, not an error; both variants carry the
/// full [`TestResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outcome {
    /// At least one supra-threshold cluster survived; per-cluster p-values
    /// are reported in `TestResult::clusters`.
    Significant(TestResult),

    /// The absolute statistic field stayed below the critical threshold
    /// everywhere; `TestResult::clusters` is empty.
    NoSignificantCluster(TestResult),
}

impl Outcome {
    /// The underlying result, regardless of significance.
    pub fn result(&self) -> &TestResult {
        match self {
            Outcome::Significant(r) | Outcome::NoSignificantCluster(r) => r,
        }
    }

    /// Consume the outcome, returning the underlying result.
    pub fn into_result(self) -> TestResult {
        match self {
            Outcome::Significant(r) | Outcome::NoSignificantCluster(r) => r,
        }
    }

    /// Whether any cluster survived thresholding.
    pub fn is_significant(&self) -> bool {
        matches!(self, Outcome::Significant(_))
    }
}

/// Complete result from a field permutation test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// The observed (signed) test-statistic field, one value per domain
    /// position.
    pub statistic: Field,

    /// Critical threshold: the `100*(1-alpha)`-th percentile of the primary
    /// permutation distribution. Always non-negative.
    pub critical_threshold: f64,

    /// Type-I error rate the threshold was derived at.
    pub alpha: f64,

    /// Supra-threshold clusters of the observed field in left-to-right
    /// order. Empty when nothing survived thresholding.
    pub clusters: Vec<Cluster>,

    /// Smallest reportable p-value: `1 / |secondary distribution|`.
    ///
    /// Every p-value in `clusters` is floored at this resolution, which
    /// keeps p-values conservative (never exactly zero).
    pub p_floor: f64,

    /// Metadata for reporting and debugging.
    pub metadata: Metadata,
}

/// A supra-threshold cluster of the observed statistic field with its
/// permutation p-value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// First domain position of the cluster.
    pub start: usize,

    /// Last domain position of the cluster (inclusive).
    pub end: usize,

    /// Trapezoidal integral of `|t| - threshold` over the cluster
    /// (the single excess value for width-1 clusters).
    pub integral: f64,

    /// Fraction of the secondary permutation distribution exceeding this
    /// cluster's integral, floored at `p_floor`.
    pub p_value: f64,
}

/// Metadata for debugging and reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of observations the test ran on (total across groups for the
    /// two-sample test).
    pub n_observations: usize,

    /// Number of domain positions per field.
    pub domain_length: usize,

    /// How relabelings were enumerated.
    pub mode: Mode,

    /// Size of each permutation distribution.
    pub n_permutations: usize,

    /// Seed used in Monte Carlo mode (0 in exhaustive mode, where no
    /// randomness is involved).
    pub seed: u64,

    /// Wall-clock runtime of the test in seconds.
    pub runtime_secs: f64,
}
