//! numerical_stability — guarded numerics shared across the crate.
//!
//! Purpose
//! -------
//! Centralize the small set of numerically delicate reductions and
//! tolerances that the estimation and optimization layers depend on, so
//! that overflow-prone arithmetic is written once and audited once.
//!
//! Key behaviors
//! -------------
//! - Provide shifted log-domain reductions (`log_sum_exp`,
//!   `log_mean_exp`) used by the partition-function estimator and the
//!   maximum-entropy objective.
//! - Expose the shared eigenvalue-truncation tolerance (`EIGEN_EPS`)
//!   consumed by the regularized linear solver.
//!
//! Conventions
//! -----------
//! - Functions here assume finite inputs wherever the caller's contract
//!   guarantees them; degenerate inputs (empty arrays, infinite
//!   exponents) produce mathematically conventional values rather than
//!   errors.
//! - No I/O, no logging, no allocation beyond scalar accumulators.
//!
//! Downstream usage
//! ----------------
//! - `estimators::partition` builds the log-partition estimate on
//!   `log_sum_exp`.
//! - `maxent::objective` uses the same shifted-exponent strategy for its
//!   stabilized free-energy value.
//! - `estimators::solver` truncates eigenvalues against `EIGEN_EPS` when
//!   forming minimum-norm solutions.

pub mod transformations;

pub mod prelude {
    pub use super::transformations::{log_mean_exp, log_sum_exp, EIGEN_EPS};
}
