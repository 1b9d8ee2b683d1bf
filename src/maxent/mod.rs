//! maxent — global maximum-entropy coupling fit.
//!
//! Purpose
//! -------
//! Fit a global antisymmetric interaction matrix to joint spin-flip data
//! by maximizing a stabilized free-energy objective with a ridge
//! penalty. This is the continuous-optimization counterpart to the
//! per-spin Newton pipeline: instead of one linear solve per spin, a
//! single quasi-Newton run fits all N(N−1)/2 coupling parameters at
//! once from a pair of sample matrices.
//!
//! Key behaviors
//! -------------
//! - `coupling` converts between the compressed upper-triangular
//!   parameter vector and the full antisymmetric matrix (`A = −Aᵀ`).
//! - `objective` evaluates the min-shifted, overflow-free objective and
//!   its analytic gradient as a stateless [`penalized_optimizer::Objective`]
//!   implementation — no shared mutable objective instance exists.
//! - `fit` assembles default arguments (zero start, 1/N-scaled
//!   tolerance, iteration budget) and returns the fitted vector with the
//!   un-penalized objective value.
//!
//! Downstream usage
//! ----------------
//! - Build a [`crate::estimators::samples::PairedSamples`] from the pre-
//!   and post-transition matrices and call [`fit::fit_couplings`].
//! - Convert the fitted compressed vector to a full matrix with
//!   [`coupling::expand_coupling`] when an explicit interaction matrix
//!   is needed (e.g. for `estimators::newton::model_ep`).
//!
//! [`penalized_optimizer::Objective`]: crate::optimization::penalized_optimizer::Objective

pub mod coupling;
pub mod fit;
pub mod objective;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::coupling::{compressed_len, expand_coupling, spin_count};
    pub use super::fit::{fit_couplings, fit_couplings_with_callback, MaxEntOptions};
    pub use super::objective::MaxEntObjective;
}
