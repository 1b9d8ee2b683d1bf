//! High-level entry points for maximizing a user [`Objective`] with an
//! optional ridge penalty.
//!
//! The chosen L-BFGS solver minimizes `c(θ) = -f(θ) + λ‖θ‖²` via the
//! [`PenalizedAdapter`]; after the run, the **unpenalized** objective is
//! recomputed at the fitted parameters and reported as the outcome's
//! `value`, so callers never see the internal penalized scale.
use crate::optimization::{
    errors::OptResult,
    penalized_optimizer::{
        adapter::PenalizedAdapter,
        builders::{build_lbfgs_hager_zhang, build_lbfgs_more_thuente},
        run::run_lbfgs,
        traits::{FitOptions, LineSearcher, Objective},
        validation::validate_value,
        OptimOutcome, Theta,
    },
};

/// Maximize an objective `f(θ)` using L-BFGS with the configured line
/// search and ridge penalty.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data, λ)` in a [`PenalizedAdapter`] exposing the
///   minimization problem `c(θ) = -f(θ) + λ‖θ‖²` to `argmin`.
/// - Builds an L-BFGS solver with the line search from
///   `opts.line_searcher` and runs it via `run_lbfgs`.
/// - Recomputes the unpenalized `f(θ̂)` at the best iterate and returns
///   it as `OptimOutcome::value`.
///
/// Exhausting the iteration budget is not an error; the best iterate
/// found is returned and callers inspect `converged`/`status` to judge
/// quality.
///
/// # Errors
/// - Propagates any error from `f.check` or `f.value`.
/// - Propagates builder errors and runtime solver errors.
pub fn maximize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &FitOptions,
) -> OptResult<OptimOutcome> {
    maximize_with_callback(f, theta0, data, opts, None)
}

/// Like [`maximize`], with a callback invoked on every cost evaluation.
///
/// The callback receives the parameter vector at which the penalized
/// cost is being evaluated. Finite-difference gradient evaluations call
/// the cost repeatedly, so the callback may fire several times per
/// solver iteration.
pub fn maximize_with_callback<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &FitOptions,
    callback: Option<&dyn Fn(&Theta)>,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = PenalizedAdapter::new(f, data, opts.l2_penalty, callback);
    let outcome = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_lbfgs_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)?
        }
        LineSearcher::HagerZhang => {
            let solver = build_lbfgs_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)?
        }
    };
    let value = f.value(&outcome.theta_hat, data)?;
    validate_value(value)?;
    Ok(OptimOutcome { value, ..outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult as CrateOptResult;
    use crate::optimization::penalized_optimizer::traits::Tolerances;
    use crate::optimization::penalized_optimizer::types::{Cost, Grad};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};
    use std::cell::RefCell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end maximization of a concave quadratic with and without
    //   the ridge penalty, including the unpenalized-value contract.
    // - The FD fallback path through a gradient-free objective.
    // - Callback observation during a real solver run.
    //
    // They intentionally DO NOT cover:
    // - The maximum-entropy objective itself (maxent-layer tests).
    // -------------------------------------------------------------------------

    /// Concave quadratic f(θ) = -‖θ - c‖² with maximum at c.
    struct ShiftedQuadratic {
        center: Array1<f64>,
    }

    impl Objective for ShiftedQuadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> CrateOptResult<Cost> {
            let d = theta - &self.center;
            Ok(-d.dot(&d))
        }

        fn check(&self, theta: &Theta, _data: &()) -> CrateOptResult<()> {
            assert_eq!(theta.len(), self.center.len());
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> CrateOptResult<Grad> {
            Ok((theta - &self.center).mapv(|v| -2.0 * v))
        }
    }

    /// Same quadratic without an analytic gradient.
    struct ShiftedQuadraticNoGrad {
        center: Array1<f64>,
    }

    impl Objective for ShiftedQuadraticNoGrad {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> CrateOptResult<Cost> {
            let d = theta - &self.center;
            Ok(-d.dot(&d))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> CrateOptResult<()> {
            Ok(())
        }
    }

    fn loose_opts(l2_penalty: f64) -> FitOptions {
        let tols = Tolerances::new(Some(1e-8), None, Some(100)).unwrap();
        FitOptions::new(tols, LineSearcher::MoreThuente, false, None, l2_penalty).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // With no penalty the maximizer recovers the quadratic's maximum and
    // reports the objective value there.
    //
    // Given
    // -----
    // - f(θ) = -‖θ - (1, -2, 0.5)‖², θ0 = 0, λ = 0.
    //
    // Expect
    // ------
    // - θ̂ ≈ (1, -2, 0.5), value ≈ 0.
    fn maximize_recovers_quadratic_maximum_without_penalty() {
        // Arrange
        let f = ShiftedQuadratic { center: array![1.0, -2.0, 0.5] };
        let theta0 = Array1::zeros(3);
        let opts = loose_opts(0.0);

        // Act
        let outcome = maximize(&f, theta0, &(), &opts).unwrap();

        // Assert
        assert_abs_diff_eq!(outcome.theta_hat[0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.theta_hat[1], -2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.theta_hat[2], 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.value, 0.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // The ridge penalty shrinks the fit toward the origin, and the
    // reported value is the UNPENALIZED objective at the shrunk point.
    //
    // Given
    // -----
    // - f(θ) = -(θ - 3)², λ = 0.5. The penalized maximum is θ = 2
    //   (solving 2(3 - θ) = 2λθ), with f(2) = -1.
    //
    // Expect
    // ------
    // - θ̂ ≈ 2, value ≈ -1 (not the penalized value -3).
    fn maximize_reports_unpenalized_value_at_penalized_optimum() {
        // Arrange
        let f = ShiftedQuadratic { center: array![3.0] };
        let theta0 = Array1::zeros(1);
        let opts = loose_opts(0.5);

        // Act
        let outcome = maximize(&f, theta0, &(), &opts).unwrap();

        // Assert
        assert_abs_diff_eq!(outcome.theta_hat[0], 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.value, -1.0, epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // A gradient-free objective is optimized through the FD fallback.
    //
    // Given
    // -----
    // - f(θ) = -‖θ - (0.7, -0.3)‖² without an analytic gradient, λ = 0.
    //
    // Expect
    // ------
    // - θ̂ within 1e-2 of the maximum.
    fn maximize_works_through_fd_fallback() {
        // Arrange
        let f = ShiftedQuadraticNoGrad { center: array![0.7, -0.3] };
        let theta0 = Array1::zeros(2);
        let opts = loose_opts(0.0);

        // Act
        let outcome = maximize(&f, theta0, &(), &opts).unwrap();

        // Assert
        assert_abs_diff_eq!(outcome.theta_hat[0], 0.7, epsilon = 1e-2);
        assert_abs_diff_eq!(outcome.theta_hat[1], -0.3, epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // The callback observes parameter vectors during a real run.
    //
    // Given
    // -----
    // - A counting callback attached to a short maximization.
    //
    // Expect
    // ------
    // - The callback fired at least once.
    fn callback_observes_iterates_during_run() {
        // Arrange
        let f = ShiftedQuadratic { center: array![1.0, 1.0] };
        let theta0 = Array1::zeros(2);
        let opts = loose_opts(0.0);
        let calls = RefCell::new(0usize);
        let cb = |_: &Theta| {
            *calls.borrow_mut() += 1;
        };

        // Act
        let outcome = maximize_with_callback(&f, theta0, &(), &opts, Some(&cb)).unwrap();

        // Assert
        assert!(*calls.borrow() > 0);
        assert!(outcome.value.is_finite());
    }
}
