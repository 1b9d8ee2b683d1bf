//! maxent::fit — entry point for the global coupling fit.
//!
//! Purpose
//! -------
//! Assemble default arguments for the penalized maximizer and drive the
//! maximum-entropy objective over a pair of sample matrices, returning
//! the fitted compressed coupling vector together with the un-penalized
//! objective value at the fit.
//!
//! Key behaviors
//! -------------
//! - Zero-initialize the compressed parameter vector (length N(N−1)/2).
//! - Scale the per-parameter tolerance by 1/N and hand it to the
//!   optimizer layer, which clamps requests looser than its 1e-6 floor.
//! - Maximize `sig(θ) − λ‖θ‖²` with L-BFGS (strong-Wolfe line search,
//!   history size 1) under a fixed iteration budget; exhausting the
//!   budget returns the best iterate, never an error.
//! - After the run, emit one informational line with the largest fitted
//!   parameter magnitude (suppressible via `verbose = false`).

use ndarray::Array1;

use crate::estimators::samples::PairedSamples;
use crate::maxent::{coupling::compressed_len, objective::MaxEntObjective};
use crate::optimization::{
    errors::OptResult,
    penalized_optimizer::{
        maximize_with_callback, FitOptions, LineSearcher, OptimOutcome, Theta, Tolerances,
    },
};

/// Configuration of the maximum-entropy coupling fit.
///
/// - `l2_penalty`: ridge weight `λ` on the compressed parameters.
/// - `tol_per_param`: requested stopping tolerance per parameter; the
///   effective tolerance is `tol_per_param / N`, clamped at the
///   optimizer's 1e-6 floor.
/// - `max_iter`: iteration budget of the quasi-Newton driver.
/// - `line_searcher`: line-search strategy (strong-Wolfe More–Thuente
///   by default).
/// - `lbfgs_mem`: optional L-BFGS history size; `None` uses the crate
///   default of 1.
/// - `verbose`: when `true` (the default), one diagnostic line with the
///   maximum absolute fitted parameter is printed after optimization.
///   Informational only; not part of the functional contract.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxEntOptions {
    pub l2_penalty: f64,
    pub tol_per_param: f64,
    pub max_iter: usize,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
}

impl Default for MaxEntOptions {
    fn default() -> Self {
        Self {
            l2_penalty: 0.01,
            tol_per_param: 1e-4,
            max_iter: 50,
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: true,
        }
    }
}

/// Fit the antisymmetric coupling matrix to paired spin samples.
///
/// Maximizes the stabilized free-energy objective with a ridge penalty;
/// the returned [`OptimOutcome`] carries the fitted compressed vector in
/// `theta_hat` and the **un-penalized** objective value at the fit in
/// `value`. Convergence diagnostics (`converged`, `status`,
/// `iterations`, `grad_norm`) are passed through from the optimizer.
///
/// # Errors
/// Propagates configuration errors and backend solver failures; a fit
/// that merely exhausts its iteration budget is returned as a normal
/// outcome.
pub fn fit_couplings(samples: &PairedSamples, opts: &MaxEntOptions) -> OptResult<OptimOutcome> {
    fit_couplings_with_callback(samples, opts, None)
}

/// Like [`fit_couplings`], with a callback invoked on every objective
/// evaluation (receiving the current parameter vector).
pub fn fit_couplings_with_callback(
    samples: &PairedSamples, opts: &MaxEntOptions, callback: Option<&dyn Fn(&Theta)>,
) -> OptResult<OptimOutcome> {
    let n = samples.n_spins();
    let theta0: Theta = Array1::zeros(compressed_len(n));
    let tol = opts.tol_per_param / n as f64;
    let tols = Tolerances::new(Some(tol), Some(tol), Some(opts.max_iter))?;
    let fit_opts =
        FitOptions::new(tols, opts.line_searcher, opts.verbose, opts.lbfgs_mem, opts.l2_penalty)?;

    let objective = MaxEntObjective;
    let outcome = maximize_with_callback(&objective, theta0, samples, &fit_opts, callback)?;

    if opts.verbose {
        let max_theta = outcome.theta_hat.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()));
        eprintln!("maxent fit: max |theta| = {max_theta:.6}");
    }
    Ok(outcome)
}
