//! High-level entry point for minimizing a user-provided `EmpiricalLoss`.
//!
//! This selects BFGS or L-BFGS with either Hager–Zhang or More–Thuente line
//! search, wraps the loss in an `ArgMinAdapter`, and delegates the run to
//! `run_bfgs` / `run_lbfgs`.
use crate::optimization::{
    errors::{OptError, OptResult},
    loss_optimizer::{
        Theta, TrainingResult,
        adapter::ArgMinAdapter,
        builders::{
            build_bfgs_hager_zhang, build_bfgs_more_thuente, build_lbfgs_hager_zhang,
            build_lbfgs_more_thuente,
        },
        run::{run_bfgs, run_lbfgs},
        traits::{ConvergenceSettings, EmpiricalLoss, LineSearcher, QuasiNewton, SolverOptions},
    },
};

/// Minimize an empirical loss `c(θ)` with a quasi-Newton method.
///
/// # Behavior
/// - Re-validates `settings` (fields are public and may have been edited
///   after construction).
/// - Validates the initial guess via `f.check(theta0)`.
/// - Builds the solver selected by `solver.method` and
///   `solver.line_searcher`, runs it, and logs the outcome.
/// - A run that ends without meeting a convergence criterion (the
///   iteration cap, or an L-BFGS line search that broke down) is reported
///   as [`OptError::NotConverged`] carrying the solver's reason.
///
/// # Errors
/// - Settings validation errors (`InvalidMaxIter`, `InvalidTolGrad`, ...).
/// - Any error from `f.check`.
/// - Builder and runtime errors from the solver layer.
/// - `NotConverged` when the solver stopped before converging.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_regression::optimization::errors::OptResult;
/// use rust_regression::optimization::loss_optimizer::{
///     minimize, ConvergenceSettings, EmpiricalLoss, SolverOptions, Theta,
/// };
///
/// struct Bowl;
/// impl EmpiricalLoss for Bowl {
///     fn value(&self, theta: &Theta) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2], &ConvergenceSettings::default(),
///                    &SolverOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_regression::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: EmpiricalLoss>(
    f: &F, theta0: Theta, settings: &ConvergenceSettings, solver: &SolverOptions,
) -> OptResult<TrainingResult> {
    settings.validate()?;
    f.check(&theta0)?;
    log::debug!(
        "minimize: dim = {}, method = {:?}, line search = {:?}",
        theta0.len(),
        solver.method,
        solver.line_searcher
    );
    let problem = ArgMinAdapter::new(f);
    let outcome = match (solver.method, solver.line_searcher) {
        (QuasiNewton::Bfgs, LineSearcher::MoreThuente) => {
            run_bfgs(theta0, settings, solver, problem, build_bfgs_more_thuente(settings)?)
        }
        (QuasiNewton::Bfgs, LineSearcher::HagerZhang) => {
            run_bfgs(theta0, settings, solver, problem, build_bfgs_hager_zhang(settings)?)
        }
        (QuasiNewton::Lbfgs { mem }, LineSearcher::MoreThuente) => {
            run_lbfgs(theta0, settings, solver, problem, build_lbfgs_more_thuente(settings, mem)?)
        }
        (QuasiNewton::Lbfgs { mem }, LineSearcher::HagerZhang) => {
            run_lbfgs(theta0, settings, solver, problem, build_lbfgs_hager_zhang(settings, mem)?)
        }
    }?;

    if !outcome.converged {
        log::warn!(
            "optimizer stopped without converging: {} after {} iterations",
            outcome.status,
            outcome.iterations
        );
        return Err(OptError::NotConverged {
            status: outcome.status,
            iterations: outcome.iterations,
        });
    }
    log::info!(
        "optimizer converged: {} after {} iterations, cost = {:.6e}",
        outcome.status,
        outcome.iterations,
        outcome.cost
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loss_optimizer::types::{Cost, Grad};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - All four method/line-search combinations on a smooth loss.
    // - The finite-difference path for a loss with no analytic gradient.
    // - `NotConverged` when the iteration cap is hit.
    // - Early rejection of bad settings and bad initial guesses.
    // -------------------------------------------------------------------------

    /// Rosenbrock-style valley with an analytic gradient.
    struct Valley;

    impl EmpiricalLoss for Valley {
        fn value(&self, theta: &Theta) -> OptResult<Cost> {
            let (x, y) = (theta[0], theta[1]);
            Ok((1.0 - x).powi(2) + 10.0 * (y - x * x).powi(2))
        }

        fn check(&self, theta: &Theta) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::GradientDimMismatch { expected: 2, found: theta.len() });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, grad: &mut Grad) -> OptResult<()> {
            let (x, y) = (theta[0], theta[1]);
            grad[0] = -2.0 * (1.0 - x) - 40.0 * x * (y - x * x);
            grad[1] = 20.0 * (y - x * x);
            Ok(())
        }
    }

    /// `c(θ) = Σ (θ_j − j)²` with no analytic gradient.
    struct ValueOnly;

    impl EmpiricalLoss for ValueOnly {
        fn value(&self, theta: &Theta) -> OptResult<Cost> {
            Ok(theta.iter().enumerate().map(|(j, t)| (t - j as f64).powi(2)).sum())
        }

        fn check(&self, _theta: &Theta) -> OptResult<()> {
            Ok(())
        }
    }

    /// `c(θ) = (θ₀ − 5)²` on `|θ₀| ≤ 2`, NaN outside, so any trial step
    /// towards the minimizer fails.
    struct Fenced;

    impl EmpiricalLoss for Fenced {
        fn value(&self, theta: &Theta) -> OptResult<Cost> {
            if theta[0].abs() > 2.0 {
                return Ok(f64::NAN);
            }
            Ok((theta[0] - 5.0).powi(2))
        }

        fn check(&self, _theta: &Theta) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, grad: &mut Grad) -> OptResult<()> {
            grad[0] = 2.0 * (theta[0] - 5.0);
            Ok(())
        }
    }

    fn loose_settings() -> ConvergenceSettings {
        ConvergenceSettings::new(500, 1e-8, 1e-14, 50).expect("valid settings")
    }

    #[test]
    // Purpose
    // -------
    // Ensure every solver/line-search pairing finds the valley minimum.
    //
    // Given
    // -----
    // - `Valley` from θ₀ = [-0.5, 0.5].
    // - BFGS and L-BFGS (m = 7), each with both line searches.
    //
    // Expect
    // ------
    // - θ̂ ≈ [1, 1] within 1e-4 and a converged status for all four.
    fn minimize_all_solver_combinations_reach_valley_floor() {
        let methods = [QuasiNewton::Bfgs, QuasiNewton::Lbfgs { mem: 7 }];
        let searches = [LineSearcher::MoreThuente, LineSearcher::HagerZhang];

        for method in methods {
            for line_searcher in searches {
                // Arrange
                let options = SolverOptions::new(method, line_searcher, false).expect("options");

                // Act
                let out = minimize(&Valley, array![-0.5, 0.5], &loose_settings(), &options)
                    .unwrap_or_else(|e| panic!("{method:?}/{line_searcher:?} failed: {e}"));

                // Assert
                assert!(out.converged);
                assert!((out.theta_hat[0] - 1.0).abs() < 1e-4, "{method:?}/{line_searcher:?}");
                assert!((out.theta_hat[1] - 1.0).abs() < 1e-4, "{method:?}/{line_searcher:?}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a loss without an analytic gradient is trained through
    // the finite-difference fallback.
    //
    // Given
    // -----
    // - `ValueOnly` in three dimensions from θ₀ = 0.
    //
    // Expect
    // ------
    // - θ̂ ≈ [0, 1, 2] within 1e-5.
    fn minimize_uses_finite_differences_without_analytic_gradient() {
        let out = minimize(
            &ValueOnly,
            Theta::zeros(3),
            &loose_settings(),
            &SolverOptions::default(),
        )
        .expect("FD-backed minimize should succeed");

        for (j, t) in out.theta_hat.iter().enumerate() {
            assert!((t - j as f64).abs() < 1e-5, "θ̂[{j}] = {t}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that hitting the iteration cap is reported as an error.
    //
    // Given
    // -----
    // - `Valley` from a distant start with `max_major_iterations = 1`.
    //
    // Expect
    // ------
    // - `Err(OptError::NotConverged { iterations: 1, .. })`.
    fn minimize_reports_not_converged_on_iteration_cap() {
        let settings = ConvergenceSettings::new(1, 1e-12, 1e-12, 100).expect("valid settings");

        let err = minimize(&Valley, array![-1.5, 2.0], &settings, &SolverOptions::default())
            .expect_err("one iteration cannot converge");

        match err {
            OptError::NotConverged { iterations, .. } => assert_eq!(iterations, 1),
            other => panic!("expected NotConverged, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure settings edited into an invalid state and bad initial guesses
    // are rejected before any solver work.
    //
    // Given
    // -----
    // - Settings with `gradient_threshold = -1`.
    // - A three-element θ₀ for the two-parameter `Valley`.
    //
    // Expect
    // ------
    // - `InvalidTolGrad` and `GradientDimMismatch` respectively.
    fn minimize_rejects_invalid_inputs_up_front() {
        let mut settings = loose_settings();
        settings.gradient_threshold = -1.0;

        let bad_settings =
            minimize(&Valley, array![0.0, 0.0], &settings, &SolverOptions::default());
        let bad_theta =
            minimize(&Valley, array![0.0, 0.0, 0.0], &loose_settings(), &SolverOptions::default());

        assert!(matches!(bad_settings, Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(bad_theta, Err(OptError::GradientDimMismatch { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Confirm that a line search which cannot evaluate its trial point is
    // reported as an error for both quasi-Newton methods.
    //
    // Given
    // -----
    // - `Fenced` from θ₀ = [0]; the unit first step lands at θ = 10, where
    //   the cost is NaN.
    // - L-BFGS (m = 5) and BFGS, both with More–Thuente.
    //
    // Expect
    // ------
    // - L-BFGS: `NotConverged` whose status is the `SolverExit` reason.
    // - BFGS: the `NonFiniteCost` raised inside the line search.
    fn minimize_reports_line_search_breakdown() {
        let lbfgs = SolverOptions::new(QuasiNewton::Lbfgs { mem: 5 }, LineSearcher::MoreThuente, false)
            .expect("options");
        let bfgs =
            SolverOptions::new(QuasiNewton::Bfgs, LineSearcher::MoreThuente, false).expect("options");

        let lbfgs_err = minimize(&Fenced, array![0.0], &loose_settings(), &lbfgs)
            .expect_err("the line search cannot leave the fence");
        let bfgs_err = minimize(&Fenced, array![0.0], &loose_settings(), &bfgs)
            .expect_err("the line search cannot leave the fence");

        match lbfgs_err {
            OptError::NotConverged { status, .. } => {
                assert!(status.starts_with("SolverExit"), "status: {status}");
                assert!(status.contains("Line search terminated"), "status: {status}");
            }
            other => panic!("expected NotConverged, got {other:?}"),
        }
        assert!(matches!(bfgs_err, OptError::NonFiniteCost { .. }), "got {bfgs_err:?}");
    }
}
