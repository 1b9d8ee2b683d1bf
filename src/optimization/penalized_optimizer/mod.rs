//! penalized_optimizer — argmin-powered, ridge-penalized maximizer.
//!
//! Purpose
//! -------
//! Provide the quasi-Newton optimization layer behind the maximum-entropy
//! coupling fit. Callers implement a single trait, [`Objective`], and
//! invoke [`maximize`] (or [`maximize_with_callback`]) to run L-BFGS with
//! a configurable line search, validated tolerances, an optional ridge
//! (L2) penalty, and finite-difference gradient fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert user objectives `f(θ)` into Argmin-compatible cost functions
//!   `c(θ) = -f(θ) + λ‖θ‖²` via [`adapter::PenalizedAdapter`].
//! - Expose user-facing entry points that:
//!   - validate the initial guess with [`Objective::check`],
//!   - select an L-BFGS solver via [`builders`] based on
//!     [`traits::LineSearcher`],
//!   - execute the solver via [`run::run_lbfgs`], and
//!   - normalize results into an [`OptimOutcome`] whose `value` is the
//!     **unpenalized** objective at the fitted parameters.
//! - Clamp requested stopping tolerances at the [`traits::TOL_FLOOR`]
//!   (1e-6) so loose tolerances cannot silently weaken the fit.
//! - Treat iteration-budget exhaustion as a quality signal, never an
//!   error: the best iterate found is always returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer always **maximizes**; user code implements `f(θ)` and
//!   (optionally) `∇f(θ)`, never the internal cost.
//! - [`Objective::value`] and [`Objective::grad`] report invalid inputs
//!   as recoverable [`crate::optimization::errors::OptError`] values, not
//!   panics.
//! - Configuration types ([`Tolerances`], [`FitOptions`]) are validated
//!   on construction and treated as consistent by the solver layer.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained space as [`Theta`]
//!   (`Array1<f64>`); any structured reparameterization (e.g. the
//!   compressed antisymmetric coupling layout) belongs to the model
//!   layer.
//! - Errors bubble up as `OptResult<T>`; this module and its children
//!   never intentionally panic and use no `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - `maxent::fit` drives this layer with the stabilized free-energy
//!   objective and domain-level default arguments.
//! - Other objectives only need an [`Objective`] impl plus a
//!   [`FitOptions`] value; analytic gradients are optional.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover sign/ridge conventions and FD
//!   fallbacks ([`adapter`]), solver construction ([`builders`]),
//!   configuration and outcome invariants ([`traits`], [`validation`]),
//!   and end-to-end quadratic maximization ([`api`]).
//! - The integration suite exercises this layer through the
//!   maximum-entropy coupling fit.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{maximize, maximize_with_callback};
pub use self::traits::{FitOptions, LineSearcher, Objective, OptimOutcome, Tolerances, TOL_FLOOR};
pub use self::types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_LBFGS_MEM};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream code can write
//
//     use spin_ep::optimization::penalized_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::{maximize, maximize_with_callback};
    pub use super::traits::{FitOptions, LineSearcher, Objective, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
