//! Input-validation error types.
//!
//! All validation errors are raised before any permutation enumeration
//! begins, so an invalid input never pays the exponential cost of the
//! exhaustive relabeling loop. A field that never exceeds the critical
//! threshold is *not* an error; see [`crate::result::Outcome`].

/// Error type for invalid test inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Observation, datum, or group field lengths disagree.
    InvalidShape {
        /// Domain length the input was expected to have.
        expected: usize,
        /// Domain length actually found.
        found: usize,
        /// Which input violated the invariant.
        context: &'static str,
    },

    /// Fewer observations than the statistic requires (sample standard
    /// deviation needs at least two).
    InsufficientObservations {
        /// Number of observations provided.
        found: usize,
        /// Minimum number required.
        required: usize,
    },

    /// The observed (unpermuted) statistic field has zero sample variance at
    /// some domain position, so the t statistic is undefined there.
    ///
    /// Only the identity relabeling is validated; sign-permuted replicates
    /// may legitimately produce zero variance, and there the statistic
    /// propagates as signed infinity (see `statistics::tstat`).
    DegenerateVariance {
        /// First domain position with zero variance.
        position: usize,
    },

    /// Exhaustive two-sample enumeration requires equal group sizes.
    UnbalancedGroups {
        /// Size of group A.
        n_a: usize,
        /// Size of group B.
        n_b: usize,
    },
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::InvalidShape {
                expected,
                found,
                context,
            } => write!(
                f,
                "{} has {} domain positions, expected {}",
                context, found, expected
            ),
            FieldError::InsufficientObservations { found, required } => write!(
                f,
                "need at least {} observations for a sample standard deviation, got {}",
                required, found
            ),
            FieldError::DegenerateVariance { position } => write!(
                f,
                "zero sample variance at domain position {} - the t statistic is undefined there",
                position
            ),
            FieldError::UnbalancedGroups { n_a, n_b } => write!(
                f,
                "exhaustive two-sample enumeration requires equal group sizes, got {} and {}",
                n_a, n_b
            ),
        }
    }
}

impl std::error::Error for FieldError {}
