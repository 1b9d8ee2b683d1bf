//! Adapter that exposes a user [`Objective`] as an `argmin` problem.
//!
//! A *maximization* of an objective `f(θ)` is converted into a
//! *minimization* problem with cost `c(θ) = -f(θ) + λ‖θ‖²`, where `λ` is
//! the ridge weight carried by the adapter. Analytic gradients (if
//! provided by the user) are negated and shifted by the ridge term
//! `2λθ`. If a gradient is not provided, the **cost** closure is
//! finite-differenced, which already includes the penalty, so no extra
//! correction is needed in that branch.
//!
//! An optional callback is invoked with the current parameter vector on
//! every cost evaluation, mirroring the reference fitting procedure's
//! per-closure observer hook. Note that finite-difference gradients
//! evaluate the cost repeatedly, so the callback may fire more than once
//! per solver iteration.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    penalized_optimizer::{
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user [`Objective`] to `argmin`'s `CostFunction` and
/// `Gradient`.
///
/// - `CostFunction::cost` returns `-f(θ) + λ‖θ‖²`.
/// - `Gradient::gradient` returns:
///   - `-∇f(θ) + 2λθ` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost (penalty included).
pub struct PenalizedAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub penalty: f64,
    pub callback: Option<&'a dyn Fn(&Theta)>,
}

impl<'a, F: Objective> Clone for PenalizedAdapter<'a, F> {
    fn clone(&self) -> Self {
        Self { f: self.f, data: self.data, penalty: self.penalty, callback: self.callback }
    }
}

impl<'a, F: Objective> CostFunction for PenalizedAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -f(θ) + λ‖θ‖²`.
    ///
    /// Invokes the callback (when present), calls the user's
    /// `value(θ, data)`, and checks the result is finite.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user's `value` via `?`.
    /// - Returns `NonFiniteCost` if the objective value is not finite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        if let Some(cb) = self.callback {
            cb(theta);
        }
        let value = self.f.value(theta, self.data)?;
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { value }).into());
        }
        Ok(-value + self.penalty * theta.dot(theta))
    }
}

impl<'a, F: Objective> Gradient for PenalizedAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, it is validated and the
    ///   cost gradient `2λθ - ∇f(θ)` is returned.
    /// - Otherwise, a finite-difference gradient of the **cost** is
    ///   computed: central differences first; if any cost evaluation
    ///   failed (captured via `closure_err`) or the result fails
    ///   validation, a single retry with forward differences follows.
    ///
    /// Implementation note: the FD closure must return `f64`, so errors
    /// raised inside it cannot use `?`; the first error is captured in
    /// `closure_err` and the closure returns `NaN`, to be rethrown after
    /// the FD pass.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates errors raised by cost evaluations performed during FD.
    /// - Returns validation errors for wrong-dimension or non-finite
    ///   gradients.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                let ridge = theta.mapv(|v| 2.0 * self.penalty * v);
                Ok(ridge - g)
            }
            Err(e) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                match e {
                    OptError::GradientNotImplemented => {
                        let cost_func = |theta: &Theta| -> f64 {
                            match self.cost(theta) {
                                Ok(val) => val,
                                Err(e) => {
                                    let mut slot = closure_err.borrow_mut();
                                    if slot.is_none() {
                                        *slot = Some(e);
                                    }
                                    f64::NAN
                                }
                            }
                        };
                        let mut fd_grad = theta.central_diff(&cost_func);
                        if closure_err.borrow().is_some() {
                            fd_grad = run_fd_diff(theta, &cost_func, &closure_err)?;
                            return Ok(fd_grad);
                        }
                        match validate_grad(&fd_grad, dim) {
                            Ok(()) => Ok(fd_grad),
                            Err(_) => {
                                fd_grad = run_fd_diff(theta, &cost_func, &closure_err)?;
                                Ok(fd_grad)
                            }
                        }
                    }
                    _ => Err(e.into()),
                }
            }
        }
    }
}

impl<'a, F: Objective> PenalizedAdapter<'a, F> {
    /// Construct a new adapter over a user objective, its data, a ridge
    /// weight, and an optional per-evaluation callback.
    pub fn new(
        f: &'a F, data: &'a F::Data, penalty: f64, callback: Option<&'a dyn Fn(&Theta)>,
    ) -> Self {
        Self { f, data, penalty, callback }
    }
}

/// Compute a forward-difference gradient of `func` at `theta`, with
/// error capture.
///
/// The FD closure cannot return `Result`, so any error raised by `func`
/// is stored into `closure_err` and the closure returns `NaN`. This
/// helper clears `closure_err`, performs `forward_diff`, rethrows any
/// captured error, and validates the resulting gradient.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD
/// routine or raised by validation of the resulting gradient.
fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sign and ridge conventions of the cost.
    // - Analytic-gradient negation plus the 2λθ ridge term.
    // - The finite-difference fallback for objectives without a gradient.
    // - Callback invocation on cost evaluations.
    //
    // They intentionally DO NOT cover:
    // - Full L-BFGS runs (api-layer tests) or validation internals.
    // -------------------------------------------------------------------------

    /// Quadratic objective f(θ) = -θ·θ with analytic gradient -2θ.
    struct QuadraticWithGrad;

    impl Objective for QuadraticWithGrad {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(-theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> OptResult<Grad> {
            Ok(theta.mapv(|v| -2.0 * v))
        }
    }

    /// Same objective without an analytic gradient (forces FD).
    struct QuadraticNoGrad;

    impl Objective for QuadraticNoGrad {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(-theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The cost is the negated objective plus the ridge term.
    //
    // Given
    // -----
    // - f(θ) = -θ·θ, λ = 0.5, θ = (1, 2).
    //
    // Expect
    // ------
    // - c(θ) = 5 + 0.5·5 = 7.5.
    fn cost_applies_sign_flip_and_ridge() {
        let f = QuadraticWithGrad;
        let adapter = PenalizedAdapter::new(&f, &(), 0.5, None);
        let theta = array![1.0, 2.0];
        let c = adapter.cost(&theta).unwrap();
        assert_abs_diff_eq!(c, 7.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The analytic-gradient branch returns 2λθ - ∇f(θ).
    //
    // Given
    // -----
    // - ∇f(θ) = -2θ, λ = 0.5, θ = (1, -3).
    //
    // Expect
    // ------
    // - Cost gradient = 2·0.5·θ + 2θ = 3θ.
    fn gradient_uses_analytic_branch_with_ridge() {
        let f = QuadraticWithGrad;
        let adapter = PenalizedAdapter::new(&f, &(), 0.5, None);
        let theta = array![1.0, -3.0];
        let g = adapter.gradient(&theta).unwrap();
        assert_abs_diff_eq!(g[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g[1], -9.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the FD fallback differentiates the
    // penalized cost and agrees with the analytic answer.
    //
    // Given
    // -----
    // - f(θ) = -θ·θ without grad, λ = 0.25, θ = (0.5, -1.5).
    //
    // Expect
    // ------
    // - FD gradient ≈ 2λθ + 2θ = 2.5θ within FD tolerance.
    fn gradient_falls_back_to_finite_differences() {
        let f = QuadraticNoGrad;
        let adapter = PenalizedAdapter::new(&f, &(), 0.25, None);
        let theta = array![0.5, -1.5];
        let g = adapter.gradient(&theta).unwrap();
        assert_abs_diff_eq!(g[0], 1.25, epsilon = 1e-5);
        assert_abs_diff_eq!(g[1], -3.75, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // The per-evaluation callback fires on every cost call.
    //
    // Given
    // -----
    // - A counting callback and two cost evaluations.
    //
    // Expect
    // ------
    // - The counter reads 2 afterwards.
    fn callback_fires_on_cost_evaluations() {
        let f = QuadraticWithGrad;
        let calls = RefCell::new(0usize);
        let cb = |_: &Theta| {
            *calls.borrow_mut() += 1;
        };
        let adapter = PenalizedAdapter::new(&f, &(), 0.0, Some(&cb));
        let theta = array![1.0, 1.0];
        adapter.cost(&theta).unwrap();
        adapter.cost(&theta).unwrap();
        assert_eq!(*calls.borrow(), 2);
    }
}
