//! Execution helper that runs an `argmin` solver on a penalized
//! objective and converts the final state into a crate-friendly
//! [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    penalized_optimizer::{
        adapter::PenalizedAdapter, traits::FitOptions, Grad, Objective, OptimOutcome, Theta,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an `argmin` optimization for a penalized objective.
///
/// This is the shared runner used by both line-search variants. It wires
/// up the adapted problem, the chosen solver, the initial parameter
/// vector, optional observers (behind the `obs_slog` feature), and the
/// iteration cap, then executes the solver and converts the result into
/// an [`OptimOutcome`].
///
/// The `value` of the returned outcome is the negated best *cost* — i.e.
/// the penalized objective at the best iterate. The api layer replaces
/// it with the unpenalized objective before handing results to callers.
///
/// # Type Parameters
/// - `F`: the user objective type implementing [`Objective`].
/// - `S`: any `argmin` solver over `PenalizedAdapter<'a, F>` whose
///   iterate state matches the crate aliases.
///
/// # Errors
/// - Propagates `argmin` runtime errors (solver or line-search failures)
///   via the crate's `From<argmin::core::Error>` conversion.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &FitOptions, problem: PenalizedAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: argmin::core::Solver<
            PenalizedAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &PenalizedAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: cost(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
