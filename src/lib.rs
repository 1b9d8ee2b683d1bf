//! spin_ep — entropy-production estimators for multipartite spin systems.
//!
//! Purpose
//! -------
//! Estimate the entropy-production (EP) rate of a multipartite spin
//! system from time-series samples of spin-flip events. Two
//! complementary per-spin estimators are provided — a cheap
//! thermodynamic-uncertainty-relation (MTUR) lower bound and a
//! Newton-Raphson maximum-likelihood refinement — together with a global
//! maximum-entropy fit of an antisymmetric coupling matrix driven by a
//! quasi-Newton optimizer.
//!
//! Key behaviors
//! -------------
//! - Consume a fixed-format in-memory sample matrix `S` of shape (N, T)
//!   (rows are spins, columns are independent flip-event samples) and,
//!   where applicable, a same-shape companion matrix; return scalar and
//!   vector numeric results. No data loading, simulation, or plotting.
//! - Per-spin pipeline (`estimators`): empirical correlation statistics,
//!   a log-space partition-function estimate, a regularized linear solve
//!   for the tilting parameters, and one-to-many Newton refinement
//!   steps.
//! - Global fit (`maxent` over `optimization`): a stabilized
//!   free-energy objective with analytic gradient, maximized by L-BFGS
//!   with a ridge penalty and strong-Wolfe line search.
//!
//! Invariants & assumptions
//! ------------------------
//! - N ≥ 2 and T ≥ 1, enforced once at container construction; all data
//!   is finite `f64`.
//! - Inputs are treated as immutable; index removal always produces new
//!   arrays, and nothing persists across calls except values explicitly
//!   threaded through (theta, Da).
//! - Shape and index violations fail fast as typed errors; numerical
//!   ill-conditioning is absorbed by adaptive regularization; overflow
//!   is prevented by log-space computation throughout.
//!
//! Concurrency
//! -----------
//! - Single-threaded, synchronous, CPU-bound. No shared mutable state
//!   exists between invocations: callers wanting parallelism across
//!   spins run independent calls on their own data copies.
//!
//! Downstream usage
//! ----------------
//! - Per-spin: build a [`estimators::samples::SpinSamples`], call
//!   [`estimators::newton::SpinEpEstimate::one_step`], optionally
//!   iterate [`estimators::newton::NewtonRefinement::step`], or let
//!   [`estimators::newton::SystemEp::estimate`] drive all spins.
//! - Global: build a [`estimators::samples::PairedSamples`] and call
//!   [`maxent::fit::fit_couplings`].
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module and pin hand-computed values,
//!   exact algebraic properties (antisymmetry, removal, fixed points),
//!   and contract violations.
//! - `tests/integration_ep_pipeline.rs` exercises the full pipeline on
//!   seeded synthetic kinetic-Ising flip data.

pub mod estimators;
pub mod maxent;
pub mod optimization;
