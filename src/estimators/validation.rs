//! estimators::validation — shared input guards for the pipeline.
//!
//! Centralizes the index and length checks performed at every public
//! estimator entry point, so the computational code below can assume
//! consistent shapes. A successful return guarantees the checked
//! constraint; all failures are reported through [`EpError`], never by
//! panicking.

use ndarray::{Array1, Array2};

use crate::estimators::errors::{EpError, EpResult};

/// Validate that `index` addresses a row of an `n_spins`-row matrix.
///
/// # Errors
/// Returns [`EpError::SpinIndexOutOfRange`] when `index >= n_spins`.
pub fn validate_spin_index(n_spins: usize, index: usize) -> EpResult<()> {
    if index >= n_spins {
        return Err(EpError::SpinIndexOutOfRange { index, n_spins });
    }
    Ok(())
}

/// Validate that a tilting-parameter vector has the expected length.
///
/// # Errors
/// Returns [`EpError::ThetaLengthMismatch`] on disagreement.
pub fn validate_theta_len(expected: usize, theta: &Array1<f64>) -> EpResult<()> {
    if theta.len() != expected {
        return Err(EpError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    Ok(())
}

/// Validate that a correlation vector has the expected length.
///
/// # Errors
/// Returns [`EpError::DaLengthMismatch`] on disagreement.
pub fn validate_da_len(expected: usize, da: &Array1<f64>) -> EpResult<()> {
    if da.len() != expected {
        return Err(EpError::DaLengthMismatch { expected, actual: da.len() });
    }
    Ok(())
}

/// Validate that an interaction matrix is square with the given side.
///
/// # Errors
/// Returns [`EpError::CouplingShapeMismatch`] on disagreement.
pub fn validate_coupling_shape(n: usize, j: &Array2<f64>) -> EpResult<()> {
    if j.nrows() != n || j.ncols() != n {
        return Err(EpError::CouplingShapeMismatch {
            expected: (n, n),
            actual: (j.nrows(), j.ncols()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover each guard's accept and reject branch.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Index and length guards accept consistent inputs and reject the
    // boundary violations with the right variants.
    fn guards_accept_and_reject_as_documented() {
        assert!(validate_spin_index(4, 3).is_ok());
        assert_eq!(
            validate_spin_index(4, 4),
            Err(EpError::SpinIndexOutOfRange { index: 4, n_spins: 4 })
        );

        let theta = array![0.0, 0.0, 0.0];
        assert!(validate_theta_len(3, &theta).is_ok());
        assert_eq!(
            validate_theta_len(2, &theta),
            Err(EpError::ThetaLengthMismatch { expected: 2, actual: 3 })
        );

        let da = array![0.0, 0.0];
        assert!(validate_da_len(2, &da).is_ok());
        assert!(validate_da_len(4, &da).is_err());

        let j = Array2::<f64>::zeros((3, 3));
        assert!(validate_coupling_shape(3, &j).is_ok());
        assert_eq!(
            validate_coupling_shape(2, &j),
            Err(EpError::CouplingShapeMismatch { expected: (2, 2), actual: (3, 3) })
        );
    }
}
