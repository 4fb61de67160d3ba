//! Type aliases and common types.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// A scalar field: one real value per position along a 1-D spatial domain.
///
/// Order is semantically meaningful: adjacency defines clusters.
pub type Field = DVector<f64>;

/// A set of repeated field observations, one row per observation and one
/// column per domain position.
pub type Observations = DMatrix<f64>;

/// Enumeration mode for the permutation distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Enumerate every relabeling: all 2ⁿ sign vectors (one-sample) or all
    /// C(n, nA) group partitions (two-sample).
    ///
    /// Cost grows exponentially with the observation count; practical up to
    /// roughly n ≈ 20 observations. Beyond that, use [`Mode::MonteCarlo`].
    Exhaustive,

    /// Sample a fixed number of random relabelings from a seeded PRNG.
    ///
    /// Deterministic given the configured seed.
    MonteCarlo,
}
