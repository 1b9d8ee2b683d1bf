//! estimators::correlations — flip-correlation statistics.
//!
//! Purpose
//! -------
//! Compute the empirical correlation statistics that drive the per-spin
//! entropy-production estimators: the pairwise correlation of a
//! reference spin's flip indicator with every spin's signed state, the
//! matching fourth-order (second-moment) matrix, and both statistics
//! importance-reweighted under a candidate tilting vector `θ`.
//!
//! Key behaviors
//! -------------
//! - [`flip_correlations`]: `Da[j] = (1/T) Σ_r (−2 S[i,r]) S[j,r]` — the
//!   expected potential change when spin `i` is forced to flip,
//!   correlated with spin `j`'s state.
//! - [`flip_correlations4`]: `K = (4 S) Sᵀ / T`, the N×N second-moment
//!   matrix; symmetric by construction.
//! - [`weighted_flip_correlations`] / [`weighted_flip_correlations4`]:
//!   the same statistics with each sample reweighted by `exp(−thf_r)`,
//!   where `thf_r = (−2 S[i,r]) (θ · S₋ᵢ[:,r])` is the tilting field and
//!   `S₋ᵢ` is the sample matrix with row `i` removed. The weighted pair
//!   statistic carries the post-flip sign `+2 S[i,r]`, so at `θ = 0` it
//!   equals `−Da`.
//!
//! Conventions
//! -----------
//! - **Unnormalized contract**: the reweighted statistics are NOT
//!   divided by the partition constant. Callers must divide by
//!   `Z = exp(log_partition(..))` (or subtract `logZ` in log space)
//!   before use.
//! - Self entries (index `i`) are retained, never zeroed; consumers
//!   strip them via `estimators::slicing` before any solve or dot
//!   product ("always remove, never zero").
//!
//! Testing notes
//! -------------
//! - Unit tests pin the symmetry of the fourth-order matrix, hand-
//!   computed values on small literal matrices, and the θ = 0
//!   degeneration of the weighted statistics onto the plain ones.

use ndarray::{Array1, Array2};

use crate::estimators::{
    errors::EpResult,
    samples::SpinSamples,
    slicing::drop_row,
    validation::{validate_spin_index, validate_theta_len},
};

/// Pairwise flip correlations of spin `i` against all spins.
///
/// `Da[j] = (1/T) Σ_r (−2 S[i,r]) S[j,r]` for every `j`, including the
/// self entry `j = i`, which downstream code removes before use.
///
/// # Errors
/// Returns an index error when `i` is not a valid spin.
pub fn flip_correlations(samples: &SpinSamples, i: usize) -> EpResult<Array1<f64>> {
    validate_spin_index(samples.n_spins(), i)?;
    let s = samples.matrix();
    let t = samples.n_samples() as f64;
    let w = s.row(i).mapv(|x| -2.0 * x);
    Ok(s.dot(&w) / t)
}

/// Fourth-order correlation matrix `K = (4 S) Sᵀ / T`.
///
/// Symmetric by construction. The reference spin's row and column are
/// retained; consumers remove them before the linear solve.
pub fn flip_correlations4(samples: &SpinSamples) -> Array2<f64> {
    let s = samples.matrix();
    let t = samples.n_samples() as f64;
    s.mapv(|x| 4.0 * x).dot(&s.t()) / t
}

/// Tilting field `thf_r = (−2 S[i,r]) (θ · S₋ᵢ[:,r])` over all samples.
///
/// Shared by the weighted correlations and the partition-function
/// estimator. Callers have already validated `i` and `θ`.
pub(crate) fn tilt_field(s: &Array2<f64>, theta: &Array1<f64>, i: usize) -> Array1<f64> {
    let rest = drop_row(s, i);
    let proj = theta.dot(&rest);
    Array1::from_iter(
        s.row(i).iter().zip(proj.iter()).map(|(&si, &p)| -2.0 * si * p),
    )
}

/// Reweighted pairwise correlations under `θ`.
///
/// `Da_θ[j] = (1/T) Σ_r (+2 S[i,r]) e^(−thf_r) S[j,r]` — the post-flip
/// sign convention, so the result equals `−Da` at `θ = 0`.
///
/// UNNORMALIZED: divide by the partition constant before use.
///
/// # Errors
/// Returns an index error for an invalid `i` and a length error when
/// `θ.len() != N − 1`.
pub fn weighted_flip_correlations(
    samples: &SpinSamples, theta: &Array1<f64>, i: usize,
) -> EpResult<Array1<f64>> {
    validate_spin_index(samples.n_spins(), i)?;
    validate_theta_len(samples.n_spins() - 1, theta)?;
    let s = samples.matrix();
    let t = samples.n_samples() as f64;
    let thf = tilt_field(s, theta, i);
    let w = Array1::from_iter(
        s.row(i).iter().zip(thf.iter()).map(|(&si, &f)| 2.0 * si * (-f).exp()),
    );
    Ok(s.dot(&w) / t)
}

/// Reweighted fourth-order correlations under `θ`.
///
/// `K_θ[j,k] = (1/T) Σ_r 4 e^(−thf_r) S[j,r] S[k,r]`; symmetric by
/// construction and equal to [`flip_correlations4`] at `θ = 0`.
///
/// UNNORMALIZED: divide by the partition constant before use.
///
/// # Errors
/// Returns an index error for an invalid `i` and a length error when
/// `θ.len() != N − 1`.
pub fn weighted_flip_correlations4(
    samples: &SpinSamples, theta: &Array1<f64>, i: usize,
) -> EpResult<Array2<f64>> {
    validate_spin_index(samples.n_spins(), i)?;
    validate_theta_len(samples.n_spins() - 1, theta)?;
    let s = samples.matrix();
    let t = samples.n_samples() as f64;
    let thf = tilt_field(s, theta, i);
    let w = thf.mapv(|f| (-f).exp());
    let weighted = (s * &w).mapv(|x| 4.0 * x);
    Ok(weighted.dot(&s.t()) / t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Hand-computed pair correlations on a small literal matrix.
    // - Exact symmetry of the fourth-order matrix.
    // - The theta = 0 degeneration of both weighted statistics.
    // - Contract violations (bad index, bad theta length).
    //
    // They intentionally DO NOT cover:
    // - Partition-function normalization (partition-module tests) or the
    //   downstream solve (solver/newton tests).
    // -------------------------------------------------------------------------

    fn small_samples() -> SpinSamples {
        SpinSamples::new(array![
            [1.0, -1.0, 1.0, 1.0],
            [1.0, 1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0, -1.0]
        ])
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The pair correlation matches a hand computation on a 3x4 matrix.
    //
    // Given
    // -----
    // - The literal matrix above and reference spin i = 0.
    //
    // Expect
    // ------
    // - Da[0] = mean(-2 s0 s0) = -2.
    // - Da[1] = mean(-2 s0 s1) = -2 * (1 - 1 - 1 + 1)/4 = 0.
    // - Da[2] = mean(-2 s0 s2) = -2 * (-1 - 1 + 1 - 1)/4 = 1.
    fn flip_correlations_match_hand_computation() {
        let s = small_samples();
        let da = flip_correlations(&s, 0).unwrap();
        assert_abs_diff_eq!(da[0], -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(da[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(da[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The fourth-order matrix is exactly symmetric.
    //
    // Given
    // -----
    // - The literal 3x4 sample matrix.
    //
    // Expect
    // ------
    // - K[j][k] == K[k][j] for all pairs, and K[j][j] = 4 for ±1 data.
    fn fourth_order_matrix_is_symmetric() {
        let s = small_samples();
        let k = flip_correlations4(&s);
        for j in 0..3 {
            assert_abs_diff_eq!(k[[j, j]], 4.0, epsilon = 1e-12);
            for l in 0..3 {
                assert_abs_diff_eq!(k[[j, l]], k[[l, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // At theta = 0 the weighted statistics reduce to the plain ones:
    // the pair statistic flips sign (post-flip convention) and the
    // fourth-order matrix is unchanged.
    //
    // Given
    // -----
    // - theta = 0 of length N - 1 = 2, reference spin i = 1.
    //
    // Expect
    // ------
    // - weighted Da == -Da and weighted K == K, entrywise.
    fn weighted_statistics_degenerate_at_zero_theta() {
        let s = small_samples();
        let theta = Array1::zeros(2);

        let da = flip_correlations(&s, 1).unwrap();
        let da_w = weighted_flip_correlations(&s, &theta, 1).unwrap();
        for j in 0..3 {
            assert_abs_diff_eq!(da_w[j], -da[j], epsilon = 1e-12);
        }

        let k = flip_correlations4(&s);
        let k_w = weighted_flip_correlations4(&s, &theta, 1).unwrap();
        for j in 0..3 {
            for l in 0..3 {
                assert_abs_diff_eq!(k_w[[j, l]], k[[j, l]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Contract violations fail fast with the documented errors.
    fn contract_violations_fail_fast() {
        let s = small_samples();
        assert!(flip_correlations(&s, 3).is_err());
        let wrong_theta = Array1::zeros(3);
        assert!(weighted_flip_correlations(&s, &wrong_theta, 0).is_err());
        assert!(weighted_flip_correlations4(&s, &wrong_theta, 0).is_err());
    }
}
