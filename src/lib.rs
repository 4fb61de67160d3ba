//! # upcross
//!
//! Cluster-extent permutation testing for spatially-ordered scalar fields.
//!
//! Given repeated observations of a 1-D field (e.g. stiffness, strain, or
//! stress along a structure, one field per probabilistic finite-element
//! run) and a reference/datum field, this crate answers: *where* does the
//! observed field differ significantly from the datum, corrected for
//! multiple comparisons across the whole spatial domain?
//!
//! The method is non-parametric:
//! - a pointwise t-statistic field is computed from the observations,
//! - a global critical threshold is the `100*(1-alpha)`-th percentile of
//!   the max-|t| distribution over sign (or group) relabelings,
//! - contiguous supra-threshold clusters of the observed field get p-values
//!   from the max-cluster-integral distribution over the same relabelings,
//!   floored at one over the number of relabelings.
//!
//! ## Quick start
//!
//! ```ignore
//! use upcross::{helpers::observations_from_rows, PermutationTest};
//! use nalgebra::DVector;
//!
//! let observations = observations_from_rows(&fields)?; // one row per run
//! let datum = DVector::from_vec(reference_field);
//!
//! let outcome = PermutationTest::new().alpha(0.05).run(&observations, &datum)?;
//!
//! println!("{}", upcross::output::format_outcome(&outcome));
//! ```
//!
//! Exhaustive enumeration is exact and bit-reproducible but costs 2ⁿ
//! (one-sample) or C(n, nA) (two-sample) statistic-field recomputations;
//! beyond roughly 20 observations use `.monte_carlo(iterations, seed)`,
//! which samples relabelings reproducibly from the given seed.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod engine;
mod error;
mod result;
mod thread_pool;
mod types;

// Functional modules
pub mod helpers;
pub mod output;
pub mod runner;
pub mod statistics;

// Re-exports for public API
pub use config::Config;
pub use engine::PermutationTest;
pub use error::FieldError;
pub use result::{Cluster, Metadata, Outcome, TestResult};
pub use runner::ModelRunner;
pub use types::{Field, Mode, Observations};

/// Convenience function for a one-sample test with default configuration.
///
/// Runs a two-tailed, exhaustive field-wide test of `observations` (one row
/// per observed field) against the `datum` field at Type-I error rate
/// `alpha`.
///
/// # Errors
///
/// See [`PermutationTest::run`].
pub fn ttest(
    observations: &Observations,
    datum: &Field,
    alpha: f64,
) -> Result<Outcome, FieldError> {
    PermutationTest::new().alpha(alpha).run(observations, datum)
}

/// Convenience function for a two-sample test with default configuration.
///
/// Runs a two-tailed, exhaustive field-wide comparison of two observation
/// groups at Type-I error rate `alpha`. Group sizes must match in
/// exhaustive mode; see [`PermutationTest::run_two_sample`].
///
/// # Errors
///
/// See [`PermutationTest::run_two_sample`].
pub fn ttest2(
    group_a: &Observations,
    group_b: &Observations,
    alpha: f64,
) -> Result<Outcome, FieldError> {
    PermutationTest::new()
        .alpha(alpha)
        .run_two_sample(group_a, group_b)
}
