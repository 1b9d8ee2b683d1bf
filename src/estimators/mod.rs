//! estimators — per-spin entropy-production estimation pipeline.
//!
//! Purpose
//! -------
//! Estimate the entropy-production contribution of each spin of a
//! multipartite system from time-series samples of spin-flip events.
//! Two complementary estimates are produced: the computationally cheap
//! thermodynamic-uncertainty-relation (MTUR) lower bound and a Newton
//! maximum-likelihood estimate that can be sharpened by iterating a
//! Newton-Raphson correction.
//!
//! Key behaviors
//! -------------
//! - Validate sample matrices once at construction (`samples`), so the
//!   numerical layers can assume well-formed inputs.
//! - Compute plain and tilted correlation statistics (`correlations`),
//!   with reweighted statistics returned **unnormalized** by contract.
//! - Estimate the tilted ensemble's normalization constant strictly in
//!   log space (`partition`).
//! - Solve the reduced Newton system with scale-adaptive Tikhonov
//!   regularization and an eigen-based least-squares backend (`solver`);
//!   singular curvature is absorbed, never surfaced.
//! - Orchestrate the above into per-spin and whole-system estimates
//!   (`newton`), with the covariance-correction convention as an
//!   explicit configuration choice.
//!
//! Conventions
//! -----------
//! - Sample matrices are (N, T): rows are spins, columns are independent
//!   flip-event samples; all data is `f64`.
//! - Self-correlation entries are carried through and removed via
//!   `slicing` immediately before use — never zeroed in place.
//! - All fallible entry points return `EpResult<T>`; shape and index
//!   violations fail fast and are never recovered internally.
//!
//! Downstream usage
//! ----------------
//! - Callers construct a [`samples::SpinSamples`], then use
//!   [`newton::SpinEpEstimate::one_step`] /
//!   [`newton::NewtonRefinement::step`] per spin, or
//!   [`newton::SystemEp::estimate`] for the summed estimate.
//! - The maximum-entropy fit (`crate::maxent`) shares the sample
//!   containers and the error surface but follows its own optimization
//!   path.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule pin hand-computed values on literal
//!   matrices and the contract violations; statistical behavior on
//!   driven synthetic data is exercised by the integration suite.

pub mod correlations;
pub mod errors;
pub mod newton;
pub mod partition;
pub mod samples;
pub mod slicing;
pub mod solver;
pub mod validation;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream code can write
//
//     use spin_ep::estimators::prelude::*;
//
// to import the estimator surface in a single line.

pub mod prelude {
    pub use super::correlations::{
        flip_correlations, flip_correlations4, weighted_flip_correlations,
        weighted_flip_correlations4,
    };
    pub use super::errors::{EpError, EpResult};
    pub use super::newton::{
        model_ep, CovarianceNormalization, EpOptions, NewtonRefinement, SpinEpEstimate, SystemEp,
    };
    pub use super::partition::log_partition;
    pub use super::samples::{PairedSamples, SpinSamples};
    pub use super::solver::solve_regularized;
}
