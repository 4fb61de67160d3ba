//! Utilities for assembling test inputs from simulation output.
//!
//! The permutation engine consumes an observation matrix and a datum field;
//! these helpers bridge the gap from what a finite-element run actually
//! yields (per-element tensor records, one scalar field per run) to
//! those shapes.

use nalgebra::{DMatrix, DVector};

use crate::error::FieldError;
use crate::types::{Field, Observations};

/// Reduce a symmetric-tensor field to its effective scalar field.
///
/// Each row holds the six independent tensor components
/// `(x0, x1, x2, a, b, c)` of one domain position. The reduction
///
/// ```text
/// sqrt(0.5 * ((x0-x1)² + (x0-x2)² + (x1-x2)² + 6*(a² + b² + c²)))
/// ```
///
/// yields the effective strain field from a strain tensor field, or the von
/// Mises stress field from a stress tensor field.
///
/// # Errors
///
/// Returns [`FieldError::InvalidShape`] unless the tensor field has exactly
/// six columns.
pub fn effective_field(tensor: &DMatrix<f64>) -> Result<Field, FieldError> {
    if tensor.ncols() != 6 {
        return Err(FieldError::InvalidShape {
            expected: 6,
            found: tensor.ncols(),
            context: "tensor field",
        });
    }

    let m = tensor.nrows();
    let mut field = DVector::zeros(m);
    for i in 0..m {
        let (x0, x1, x2) = (tensor[(i, 0)], tensor[(i, 1)], tensor[(i, 2)]);
        let (a, b, c) = (tensor[(i, 3)], tensor[(i, 4)], tensor[(i, 5)]);
        let s = (x0 - x1).powi(2)
            + (x0 - x2).powi(2)
            + (x1 - x2).powi(2)
            + 6.0 * (a * a + b * b + c * c);
        field[i] = (0.5 * s).sqrt();
    }
    Ok(field)
}

/// Build an observation matrix from per-run fields, one row per run.
///
/// # Errors
///
/// Returns [`FieldError::InvalidShape`] when rows disagree on domain length,
/// and [`FieldError::InsufficientObservations`] for an empty collection.
pub fn observations_from_rows(rows: &[Vec<f64>]) -> Result<Observations, FieldError> {
    let n = rows.len();
    if n == 0 {
        return Err(FieldError::InsufficientObservations {
            found: 0,
            required: 2,
        });
    }

    let m = rows[0].len();
    for row in rows {
        if row.len() != m {
            return Err(FieldError::InvalidShape {
                expected: m,
                found: row.len(),
                context: "observation row",
            });
        }
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(n, m, &flat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_field_pure_shear() {
        // Only the shear term: sqrt(0.5 * 6 * a^2) = |a| * sqrt(3)
        let tensor = DMatrix::from_row_slice(1, 6, &[0.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        let field = effective_field(&tensor).unwrap();
        assert!((field[0] - 2.0 * 3.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_effective_field_uniaxial() {
        // Uniaxial (x0, 0, 0): sqrt(0.5 * 2 * x0^2) = |x0|
        let tensor = DMatrix::from_row_slice(1, 6, &[5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let field = effective_field(&tensor).unwrap();
        assert!((field[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_effective_field_hydrostatic_vanishes() {
        // Equal normal components produce zero effective value
        let tensor = DMatrix::from_row_slice(1, 6, &[3.0, 3.0, 3.0, 0.0, 0.0, 0.0]);
        let field = effective_field(&tensor).unwrap();
        assert!(field[0].abs() < 1e-12);
    }

    #[test]
    fn test_effective_field_wrong_width() {
        let tensor = DMatrix::from_row_slice(1, 5, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(matches!(
            effective_field(&tensor),
            Err(FieldError::InvalidShape { expected: 6, .. })
        ));
    }

    #[test]
    fn test_observations_from_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let obs = observations_from_rows(&rows).unwrap();
        assert_eq!(obs.nrows(), 2);
        assert_eq!(obs.ncols(), 2);
        assert_eq!(obs[(1, 0)], 3.0);
    }

    #[test]
    fn test_observations_from_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            observations_from_rows(&rows),
            Err(FieldError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_observations_from_no_rows() {
        let rows: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            observations_from_rows(&rows),
            Err(FieldError::InsufficientObservations { .. })
        ));
    }
}
