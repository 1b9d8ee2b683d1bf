//! Numerically stable reductions for exponential-family estimates.
//!
//! Every partition-function and free-energy quantity in this crate is an
//! average of exponentials `mean(exp(x_r))` whose exponents grow linearly
//! with the tilting parameters. Evaluating those averages directly
//! overflows `f64` long before the parameters become physically
//! interesting, so all callers go through the shifted reductions defined
//! here: the largest exponent is subtracted before exponentiation and
//! added back after the logarithm, keeping every intermediate in a
//! well-conditioned regime.
//!
//! # Provided items
//! - [`log_sum_exp`]: stable `ln(Σ_r exp(x_r))`.
//! - [`log_mean_exp`]: stable `ln((1/T) Σ_r exp(x_r))`.
//! - [`EIGEN_EPS`]: shared eigenvalue-truncation tolerance for the
//!   regularized least-squares solver.
//!
//! # Rationale
//! Overflow in these reductions is a correctness bug, not a recoverable
//! condition: the estimators guarantee finite log-partition values for
//! finite parameters and bounded samples, and that guarantee is
//! discharged here rather than by catch-and-retry logic downstream.

use ndarray::ArrayView1;

/// Eigenvalue-truncation tolerance for pseudoinverse solves.
///
/// Eigenvalues whose shifted magnitude is at most this value are treated
/// as numerically zero and excluded from the solution, yielding the
/// minimum-norm least-squares answer along the remaining directions.
pub const EIGEN_EPS: f64 = 1e-12;

/// Stable `ln(Σ_r exp(x_r))` via max-subtraction.
///
/// Subtracts `m = max_r x_r` before exponentiation so every summand lies
/// in `(0, 1]`, then adds `m` back after the logarithm. Exact up to
/// floating rounding for finite inputs of any magnitude.
///
/// # Parameters
/// - `xs`: exponents; may be empty.
///
/// # Returns
/// - `ln(Σ exp(x_r))` as `f64`.
/// - `f64::NEG_INFINITY` for an empty input (empty sum).
/// - `m` itself when `m` is not finite (`−∞` when all entries are `−∞`,
///   `+∞` when any entry is `+∞`).
pub fn log_sum_exp(xs: ArrayView1<f64>) -> f64 {
    let m = xs.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if !m.is_finite() {
        return m;
    }
    let sum = xs.fold(0.0, |acc, &v| acc + (v - m).exp());
    m + sum.ln()
}

/// Stable `ln((1/T) Σ_r exp(x_r))`, i.e. the log of a Monte-Carlo mean.
///
/// Equivalent to `log_sum_exp(xs) - ln(T)`; the subtraction is performed
/// in log space so the mean never materializes as a raw exponential.
///
/// # Parameters
/// - `xs`: exponents; may be empty (returns `−∞`).
pub fn log_mean_exp(xs: ArrayView1<f64>) -> f64 {
    if xs.is_empty() {
        return f64::NEG_INFINITY;
    }
    log_sum_exp(xs) - (xs.len() as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the stable reductions with the naive formulas on
    //   safe (small-magnitude) grids.
    // - Stability for exponents far outside the naive overflow range.
    // - Degenerate inputs: empty arrays and constant arrays.
    //
    // They intentionally DO NOT cover:
    // - The downstream partition-function or free-energy estimators,
    //   which are exercised in the estimator modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check that `log_sum_exp` matches the naive computation on a grid
    // where direct exponentiation is safe.
    //
    // Given
    // -----
    // - A handful of exponents in [-3, 3].
    //
    // Expect
    // ------
    // - Stable and naive results agree to floating tolerance.
    fn log_sum_exp_matches_naive_on_safe_grid() {
        let xs = array![-3.0, -0.5, 0.0, 1.25, 3.0];
        let naive = xs.iter().map(|&v: &f64| v.exp()).sum::<f64>().ln();
        assert_abs_diff_eq!(log_sum_exp(xs.view()), naive, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that large-magnitude exponents are handled without overflow
    // and with the correct shifted answer.
    //
    // Given
    // -----
    // - Exponents around 1000, where `exp` overflows `f64` directly.
    //
    // Expect
    // ------
    // - `log_sum_exp` returns `1000 + ln(1 + e^{-2} + e^{-5})`, finite.
    fn log_sum_exp_is_stable_for_large_exponents() {
        let xs = array![1000.0, 998.0, 995.0];
        let expected = 1000.0 + (1.0 + (-2.0f64).exp() + (-5.0f64).exp()).ln();
        let got = log_sum_exp(xs.view());
        assert!(got.is_finite());
        assert_abs_diff_eq!(got, expected, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `log_mean_exp` of a constant array returns the
    // constant itself (the mean of identical exponentials).
    //
    // Given
    // -----
    // - Four entries, all equal to 2.5.
    //
    // Expect
    // ------
    // - `log_mean_exp` ≈ 2.5 and `log_sum_exp` ≈ 2.5 + ln 4.
    fn log_mean_exp_of_constant_array_is_the_constant() {
        let xs = array![2.5, 2.5, 2.5, 2.5];
        assert_abs_diff_eq!(log_mean_exp(xs.view()), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(log_sum_exp(xs.view()), 2.5 + 4.0f64.ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Exercise the degenerate empty-input branch.
    //
    // Given
    // -----
    // - An empty exponent array.
    //
    // Expect
    // ------
    // - Both reductions return negative infinity (the empty sum).
    fn empty_input_yields_negative_infinity() {
        let xs = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(log_sum_exp(xs.view()), f64::NEG_INFINITY);
        assert_eq!(log_mean_exp(xs.view()), f64::NEG_INFINITY);
    }
}
