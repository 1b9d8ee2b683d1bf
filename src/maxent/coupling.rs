//! maxent::coupling — compressed antisymmetric coupling layout.
//!
//! The global maximum-entropy model is parameterized by an antisymmetric
//! N×N coupling matrix, which has N(N−1)/2 free parameters: the strictly
//! upper-triangular entries, stored row-major. This module converts
//! between the compressed vector and the full matrix and validates the
//! layout's length arithmetic.

use ndarray::{Array1, Array2};

use crate::estimators::errors::{EpError, EpResult};

/// Number of free parameters of an antisymmetric coupling over `n`
/// spins: `n(n−1)/2`.
pub fn compressed_len(n: usize) -> usize {
    n * (n - 1) / 2
}

/// Recover the spin count from a compressed vector length.
///
/// # Errors
/// Returns [`EpError::CompressedLengthInvalid`] when `len` is not of the
/// form `n(n−1)/2` for any `n ≥ 2`.
pub fn spin_count(len: usize) -> EpResult<usize> {
    let n = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    if n < 2 || compressed_len(n) != len {
        return Err(EpError::CompressedLengthInvalid { len });
    }
    Ok(n)
}

/// Expand a compressed vector into the full antisymmetric matrix.
///
/// The entries fill the strictly upper triangle row-major; the lower
/// triangle is the negated mirror, so the result satisfies `A = −Aᵀ`
/// exactly and has a zero diagonal.
///
/// # Errors
/// Returns [`EpError::CompressedLengthInvalid`] for lengths that do not
/// match any spin count.
pub fn expand_coupling(theta: &Array1<f64>) -> EpResult<Array2<f64>> {
    let n = spin_count(theta.len())?;
    let mut a = Array2::<f64>::zeros((n, n));
    let mut idx = 0;
    for j in 0..n {
        for k in (j + 1)..n {
            let v = theta[idx];
            a[[j, k]] = v;
            a[[k, j]] = -v;
            idx += 1;
        }
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the antisymmetry round-trip, the row-major entry
    // placement, and the length arithmetic including its error branch.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Expansion of an arbitrary compressed vector yields an exactly
    // antisymmetric matrix with the entries in row-major upper-triangle
    // order.
    //
    // Given
    // -----
    // - theta = (1, 2, 3, 4, 5, 6) for N = 4.
    //
    // Expect
    // ------
    // - A[0][1..3] = (1, 2, 3), A[1][2..3] = (4, 5), A[2][3] = 6;
    //   A == -Aᵀ entrywise and diag(A) == 0.
    fn expansion_is_antisymmetric_with_row_major_layout() {
        let theta = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let a = expand_coupling(&theta).unwrap();

        assert_eq!(a[[0, 1]], 1.0);
        assert_eq!(a[[0, 2]], 2.0);
        assert_eq!(a[[0, 3]], 3.0);
        assert_eq!(a[[1, 2]], 4.0);
        assert_eq!(a[[1, 3]], 5.0);
        assert_eq!(a[[2, 3]], 6.0);

        for j in 0..4 {
            assert_eq!(a[[j, j]], 0.0);
            for k in 0..4 {
                assert_eq!(a[[j, k]], -a[[k, j]]);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The length arithmetic inverts correctly and rejects non-triangular
    // lengths.
    fn length_arithmetic_round_trips_and_rejects() {
        assert_eq!(compressed_len(2), 1);
        assert_eq!(compressed_len(5), 10);
        assert_eq!(spin_count(1).unwrap(), 2);
        assert_eq!(spin_count(10).unwrap(), 5);
        assert_eq!(spin_count(4), Err(EpError::CompressedLengthInvalid { len: 4 }));
        assert_eq!(spin_count(0), Err(EpError::CompressedLengthInvalid { len: 0 }));
    }
}
