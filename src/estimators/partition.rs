//! estimators::partition — log-space partition-function estimate.
//!
//! The normalization constant of the tilted ensemble is a Monte-Carlo
//! average of exponentials, `Z = (1/T) Σ_r exp(−thf_r)`. It is always
//! computed in log space through the shared shifted reduction, so the
//! estimate stays finite for any finite tilting vector and bounded
//! samples. An earlier direct-space average (with a separate no-flip
//! count blended in) is superseded by this estimator: samples without a
//! flip carry a zero entry for the reference spin, making their tilting
//! field zero and their weight exactly one, which the log-space form
//! accounts for with no special case.

use ndarray::Array1;

use crate::estimators::{
    correlations::tilt_field,
    errors::EpResult,
    samples::SpinSamples,
    validation::{validate_spin_index, validate_theta_len},
};
use crate::optimization::numerical_stability::transformations::log_sum_exp;

/// Log of the Monte-Carlo partition estimate under `θ`.
///
/// `logZ = log_sum_exp(−thf) − ln T`, with
/// `thf_r = (−2 S[i,r]) (θ · S₋ᵢ[:,r])`.
///
/// Guarantees: `Z = exp(logZ) > 0` always; `logZ` is finite for finite
/// `θ` and bounded samples.
///
/// # Errors
/// Returns an index error for an invalid `i` and a length error when
/// `θ.len() != N − 1`.
pub fn log_partition(samples: &SpinSamples, theta: &Array1<f64>, i: usize) -> EpResult<f64> {
    validate_spin_index(samples.n_spins(), i)?;
    validate_theta_len(samples.n_spins() - 1, theta)?;
    let thf = tilt_field(samples.matrix(), theta, i);
    let neg = thf.mapv(|f| -f);
    Ok(log_sum_exp(neg.view()) - (samples.n_samples() as f64).ln())
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
    // - The zero-theta normalization (logZ == 0 exactly up to rounding).
    // - A hand-computed logZ on a two-spin literal matrix.
    // - Contract violations on index and theta length.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // With theta = 0 the tilting field vanishes, every weight is 1, and
    // the log-partition is log(1) = 0.
    //
    // Given
    // -----
    // - A 3x5 ±1 sample matrix and theta = (0, 0).
    //
    // Expect
    // ------
    // - logZ ≈ 0 within floating tolerance for every reference spin.
    fn zero_theta_log_partition_is_zero() {
        let s = SpinSamples::new(array![
            [1.0, -1.0, 1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0, -1.0, 1.0]
        ])
        .unwrap();
        let theta = Array1::zeros(2);
        for i in 0..3 {
            let ln_z = log_partition(&s, &theta, i).unwrap();
            assert_abs_diff_eq!(ln_z, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // The estimate matches a direct hand computation on a two-spin
    // system where the exponents are easy to enumerate.
    //
    // Given
    // -----
    // - S = [[1, 1, 1, -1], [1, 1, -1, -1]], i = 0, theta = (0.5).
    //   thf_r = -2 s0 (0.5 s1) = -s0 s1, so thf = (-1, -1, 1, -1).
    //
    // Expect
    // ------
    // - logZ = ln((3 e^1 + e^{-1})/4).
    fn log_partition_matches_hand_computation() {
        let s = SpinSamples::new(array![[1.0, 1.0, 1.0, -1.0], [1.0, 1.0, -1.0, -1.0]]).unwrap();
        let theta = array![0.5];
        let expected = ((3.0 * 1.0f64.exp() + (-1.0f64).exp()) / 4.0).ln();
        assert_abs_diff_eq!(log_partition(&s, &theta, 0).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Index and theta-length violations fail fast.
    fn contract_violations_fail_fast() {
        let s = SpinSamples::new(array![[1.0, -1.0], [-1.0, 1.0]]).unwrap();
        assert!(log_partition(&s, &Array1::zeros(1), 2).is_err());
        assert!(log_partition(&s, &Array1::zeros(2), 0).is_err());
    }
}
