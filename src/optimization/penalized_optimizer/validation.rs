//! Validation helpers for the penalized optimizer.
//!
//! Centralizes the consistency checks used across the optimizer surface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Fitted parameters**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks scalar outputs for
//!   finiteness.
//!
//! All helpers report failures through [`OptError`] so the surrounding
//! code stays uniform.

use crate::optimization::{
    errors::{OptError, OptResult},
    penalized_optimizer::types::{Grad, Theta},
};

/// Validate the optional gradient-norm tolerance.
///
/// Accepts `None`; a present value must be finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance.
///
/// Accepts `None`; a present value must be finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if the length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the first offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap a fitted parameter vector.
///
/// Accepts only a present vector with all finite entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was produced.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Fitted parameters must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar objective value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the error branches and success paths of the small
    // validators. They intentionally DO NOT cover solver behavior.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerance validators accept None and positive finite values, and
    // reject non-positive or non-finite ones.
    fn tolerance_validators_accept_valid_and_reject_invalid() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-8)).is_ok());
        assert!(verify_tol_grad(Some(0.0)).is_err());
        assert!(verify_tol_grad(Some(f64::NAN)).is_err());
        assert!(verify_tol_cost(Some(-1.0)).is_err());
        assert!(verify_tol_cost(Some(f64::INFINITY)).is_err());
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad` rejects dimension mismatches and non-finite entries
    // and reports the offending index.
    fn validate_grad_flags_dimension_and_finiteness() {
        let g = array![1.0, 2.0];
        assert!(validate_grad(&g, 2).is_ok());
        assert_eq!(
            validate_grad(&g, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        );
        let bad = array![1.0, f64::NAN, 3.0];
        match validate_grad(&bad, 3) {
            Err(OptError::InvalidGradient { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta_hat` unwraps a finite vector and rejects missing or
    // non-finite candidates.
    fn validate_theta_hat_unwraps_or_rejects() {
        let t = array![0.5, -0.5];
        assert_eq!(validate_theta_hat(Some(t.clone())).unwrap(), t);
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        let bad = array![0.0, f64::INFINITY];
        assert!(validate_theta_hat(Some(bad)).is_err());
    }
}
