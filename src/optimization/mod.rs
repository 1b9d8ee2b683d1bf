//! optimization — quasi-Newton stack, stable numerics, unified errors.
//!
//! Purpose
//! -------
//! Provide the optimization layer for the maximum-entropy coupling fit,
//! combining an Argmin-backed penalized maximizer, numerically stable
//! log-domain reductions, and a single error/result surface. Callers
//! implement an objective, choose tolerances, and obtain fitted
//! parameters and diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing objectives** `f(θ)` with an
//!   optional ridge penalty (`penalized_optimizer`), including solver and
//!   stopping-criterion configuration.
//! - Supply shared numerical primitives (`numerical_stability`) for
//!   overflow-free log-partition and free-energy evaluation and the
//!   eigenvalue-truncation tolerance used by the linear solver.
//! - Normalize configuration issues, numerical failures, and backend
//!   solver errors into a single enum (`errors::OptError`) with a common
//!   result alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Solvers conceptually maximize `f(θ)` by minimizing the internal cost
//!   `c(θ) = -f(θ) + λ‖θ‖²`; user-facing APIs and outcomes are expressed
//!   in terms of `f`.
//! - Parameters and gradients use `ndarray`-based aliases (`Theta`,
//!   `Grad`); public entrypoints that can fail return `OptResult<T>` and
//!   never leak raw Argmin errors.
//! - This module performs no I/O beyond optional, feature-gated progress
//!   observers and diagnostic lines.
//!
//! Downstream usage
//! ----------------
//! - `maxent` implements [`penalized_optimizer::Objective`] for the
//!   stabilized free-energy estimate and calls `maximize` through its
//!   `fit_couplings` entry point.
//! - The estimator modules use `numerical_stability` for the
//!   log-partition computation and the solver tolerance.

pub mod errors;
pub mod numerical_stability;
pub mod penalized_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream code can write
//
//     use spin_ep::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::penalized_optimizer::prelude::*;
}
