//! Contract for the model-runner collaborator.
//!
//! Producing observation fields (editing a solver model description,
//! invoking the solver, parsing its log output) is outside this crate.
//! [`ModelRunner`] pins down the shape of that boundary so test pipelines
//! can be written against it and exercised with in-memory doubles.

use crate::types::Field;

/// Produces observation fields from a model-parameter vector.
///
/// A typical implementation substitutes `parameters` (e.g. a per-element
/// stiffness profile) into a model description, runs an external
/// finite-element solver, and parses the resulting fields back out.
///
/// # Contract
///
/// - **Determinism**: identical `parameters` must yield identical fields,
///   or the permutation test downstream is meaningless.
/// - **Explicit configuration**: everything the implementation needs
///   (solver executable location, template path, working directory) must be
///   carried as fields of the implementing type, never read from ambient or
///   global state.
/// - All returned fields share one domain length across calls.
pub trait ModelRunner {
    /// Error type for solver or parsing failures.
    type Error;

    /// Simulate the model under `parameters`, returning one field per
    /// requested physical quantity (e.g. effective strain, von Mises
    /// stress).
    fn run(&mut self, parameters: &Field) -> Result<Vec<Field>, Self::Error>;
}
