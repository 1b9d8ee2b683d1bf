//! penalized_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Small, focused builders for the L-BFGS solvers used by the penalized
//! maximizer. They hide Argmin's generic wiring and apply crate-level
//! options (tolerances, history size) so higher layers can request a
//! configured solver without touching Argmin types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set an initial parameter vector or
//!   `max_iters`; those are runtime concerns applied by the runner.
//! - The history size comes from `opts.lbfgs_mem`, defaulting to
//!   [`DEFAULT_LBFGS_MEM`] (1).
//! - Errors surface as [`OptResult`]; raw `argmin::core::Error` values
//!   never leak past this module.

use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    penalized_optimizer::{
        traits::FitOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// Construct L-BFGS with the More–Thuente (strong Wolfe) line search.
///
/// Consults `opts.lbfgs_mem` for the history size and wires any present
/// tolerances from `opts.tols` into the solver.
///
/// # Errors
/// Propagates Argmin configuration errors (e.g., a rejected tolerance)
/// as [`crate::optimization::errors::OptError`].
pub fn build_lbfgs_more_thuente(opts: &FitOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with the Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` for the history size and wires any present
/// tolerances from `opts.tols` into the solver.
///
/// # Errors
/// Propagates Argmin configuration errors (e.g., a rejected tolerance)
/// as [`crate::optimization::errors::OptError`].
pub fn build_lbfgs_hager_zhang(opts: &FitOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type so both builders share one wiring
/// path. When a tolerance is `None`, the corresponding `with_tolerance_*`
/// call is skipped and Argmin's default stays in effect.
///
/// # Errors
/// Propagates Argmin errors raised by `with_tolerance_grad` /
/// `with_tolerance_cost`.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &FitOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
