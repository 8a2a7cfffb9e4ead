//! Execution helpers that run an `argmin` quasi-Newton solver on an
//! empirical loss and return a crate-friendly [`TrainingResult`].
use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{
        Grad, InvHessian, Theta, TrainingResult,
        adapter::ArgMinAdapter,
        converge::FunctionConvergence,
        traits::{ConvergenceSettings, EmpiricalLoss, SolverOptions},
    },
};
use argmin::core::{CostFunction, Executor, Gradient, IterState, Solver, State};
use argmin_math::ArgminL2Norm;
use ndarray::Array2;

/// Iteration state used by BFGS (dense inverse-Hessian approximation).
pub type BfgsState = IterState<Theta, Grad, (), InvHessian, (), f64>;

/// Iteration state used by L-BFGS (no explicit Hessian).
pub type LbfgsState = IterState<Theta, Grad, (), (), (), f64>;

/// Run BFGS on an empirical loss.
///
/// Wires up:
/// - the loss via [`ArgMinAdapter`],
/// - the solver wrapped in [`FunctionConvergence`] (windowed stall rule),
/// - initial parameter `theta0` and an identity inverse Hessian,
/// - the iteration cap from `settings.max_major_iterations`,
/// - an optional terminal observer (behind the `obs_slog` feature).
///
/// # Errors
/// - Propagates any `argmin` runtime error (solver errors, line-search
///   failures, loss errors raised during evaluation) via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors from [`TrainingResult::new`].
pub fn run_bfgs<'a, F, S>(
    theta0: Theta, settings: &ConvergenceSettings, options: &SolverOptions,
    problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<TrainingResult>
where
    F: EmpiricalLoss,
    S: Solver<ArgMinAdapter<'a, F>, BfgsState> + Send + 'static,
{
    log_initial_state(&theta0, &problem);
    let inv_hessian: InvHessian = Array2::eye(theta0.len());
    let max_iters = settings.max_major_iterations as u64;
    let wrapped =
        FunctionConvergence::new(solver, settings.function_abs_tol, settings.function_window);
    let optimizer = Executor::new(problem, wrapped)
        .configure(|state| state.param(theta0).inv_hessian(inv_hessian).max_iters(max_iters));
    #[cfg(feature = "obs_slog")]
    let optimizer = if options.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always)
    } else {
        optimizer
    };
    #[cfg(not(feature = "obs_slog"))]
    let _ = options.verbose;

    let state = optimizer.run()?.state().clone();
    collect(state)
}

/// Run L-BFGS on an empirical loss.
///
/// Same wiring as [`run_bfgs`] without the inverse-Hessian seed; the
/// history size is fixed when the solver is built.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, settings: &ConvergenceSettings, options: &SolverOptions,
    problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<TrainingResult>
where
    F: EmpiricalLoss,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    log_initial_state(&theta0, &problem);
    let max_iters = settings.max_major_iterations as u64;
    let wrapped =
        FunctionConvergence::new(solver, settings.function_abs_tol, settings.function_window);
    let optimizer = Executor::new(problem, wrapped)
        .configure(|state| state.param(theta0).max_iters(max_iters));
    #[cfg(feature = "obs_slog")]
    let optimizer = if options.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always)
    } else {
        optimizer
    };
    #[cfg(not(feature = "obs_slog"))]
    let _ = options.verbose;

    let state = optimizer.run()?.state().clone();
    collect(state)
}

// ---- Helper Methods ----

/// Convert a finished solver state into a [`TrainingResult`].
fn collect<H>(mut state: IterState<Theta, Grad, (), H, (), f64>) -> OptResult<TrainingResult> {
    let iterations = state.get_iter();
    let function_counts = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    let grad = state.take_gradient();
    let cost = state.get_best_cost();
    TrainingResult::new(
        state.take_best_param(),
        cost,
        termination,
        iterations,
        function_counts,
        grad,
    )
}

fn log_initial_state<F: EmpiricalLoss>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    match problem.cost(theta0) {
        Ok(c0) => {
            let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());
            log::debug!(
                "init: c(theta0) = {:.6}{}",
                c0,
                g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
            );
        }
        Err(e) => log::debug!("init: c(theta0) unavailable: {e}"),
    }
}
