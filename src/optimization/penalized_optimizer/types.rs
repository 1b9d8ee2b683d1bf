//! penalized_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Pin down the numeric types and pre-wired solver aliases used by the
//! penalized quasi-Newton maximizer in one place, so the surrounding
//! modules stay agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - All parameter vectors and gradients are `ndarray` containers over
//!   `f64`; `Cost` is the scalar cost `c(θ) = -f(θ) + λ‖θ‖²` seen by the
//!   backend solver.
//! - `DEFAULT_LBFGS_MEM` is 1: the coupling-fit objective is cheap to
//!   evaluate and nearly quadratic near its optimum, and a single
//!   curvature pair matches the reference fitting procedure. Callers can
//!   raise it per run through the options.
//! - The solver aliases fix Argmin's `(Param, Gradient, Float)` triple to
//!   `(Theta, Grad, Cost)` for the two supported line searches.

use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` for objective maximization.
pub type Theta = Array1<f64>;

/// Gradient vector matching the shape of [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar cost value used by the backend solver.
///
/// In this crate this is `c(θ) = -f(θ) + λ‖θ‖²` for a maximized
/// objective `f(θ)` and ridge weight `λ`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 1;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente (strong Wolfe) line search specialized to this crate's
/// numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
