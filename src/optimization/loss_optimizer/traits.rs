//! Public API surface for empirical-loss minimization.
//!
//! - [`EmpiricalLoss`]: trait models implement to expose cost and gradient.
//! - [`GradientForm`]: which direction a model's gradient evaluator reports.
//! - [`ConvergenceSettings`]: stopping rules for one minimize call.
//! - [`SolverOptions`], [`QuasiNewton`], [`LineSearcher`]: solver selection.
//! - [`TrainingResult`]: normalized result returned by `minimize`.
//!
//! Convention: the optimizer minimizes `c(θ)` directly. A model whose
//! gradient evaluator reports the descent direction `-∇c(θ)` declares
//! [`GradientForm::DescentDirection`] and the adapter flips the sign.
use crate::optimization::{
    errors::{OptError, OptResult},
    loss_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{
            validate_theta_hat, validate_value, verify_function_tol, verify_function_window,
            verify_max_iter, verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Orientation of the vector written by [`EmpiricalLoss::grad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientForm {
    /// The evaluator writes `∇c(θ)` (possibly scaled by a positive factor).
    CostGradient,
    /// The evaluator writes `-∇c(θ)` (possibly scaled by a positive factor).
    DescentDirection,
}

/// User-implemented empirical loss interface.
///
/// The loss owns its dataset; every method is a pure function of `θ` and
/// that data.
///
/// Required:
/// - `value(&Theta) -> OptResult<Cost>`: evaluate `c(θ)` over the full
///   dataset.
/// - `check(&Theta) -> OptResult<()>`: reject obviously invalid `θ` before
///   optimization starts.
///
/// Optional:
/// - `grad(&Theta, &mut Grad) -> OptResult<()>`: analytic gradient written
///   into a caller-owned buffer of length `θ.len()`, in the orientation
///   declared by [`EmpiricalLoss::GRADIENT_FORM`]. If not implemented,
///   finite differences of `value` are used automatically.
pub trait EmpiricalLoss {
    const GRADIENT_FORM: GradientForm = GradientForm::CostGradient;

    // Required methods
    fn value(&self, theta: &Theta) -> OptResult<Cost>;
    fn check(&self, theta: &Theta) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _grad: &mut Grad) -> OptResult<()> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the quasi-Newton solver.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Quasi-Newton method driving the minimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuasiNewton {
    /// Full BFGS with a dense inverse-Hessian estimate, seeded with identity.
    Bfgs,
    /// Limited-memory BFGS keeping `mem` correction pairs.
    Lbfgs { mem: usize },
}

/// Solver-level configuration.
///
/// Fields:
/// - `method`: BFGS or L-BFGS.
/// - `line_searcher`: line-search algorithm used by the method.
/// - `verbose`: if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default: `Bfgs`, `MoreThuente`, not verbose.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub method: QuasiNewton,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
}

impl SolverOptions {
    /// Create validated solver options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `method` is `Lbfgs { mem: 0 }`.
    pub fn new(method: QuasiNewton, line_searcher: LineSearcher, verbose: bool) -> OptResult<Self> {
        if let QuasiNewton::Lbfgs { mem } = method {
            if mem == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { method, line_searcher, verbose })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { method: QuasiNewton::Bfgs, line_searcher: LineSearcher::MoreThuente, verbose: false }
    }
}

/// Stopping rules for one minimize call.
///
/// - `max_major_iterations`: hard cap on solver iterations.
/// - `gradient_threshold`: stop once `‖∇c(θ)‖₂` falls below this value.
/// - `function_abs_tol` / `function_window`: stop once the best cost has
///   not improved by more than `function_abs_tol` for `function_window`
///   consecutive iterations.
///
/// Default: `100_000`, `1e-12`, `1e-12`, `100_000`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceSettings {
    pub max_major_iterations: usize,
    pub gradient_threshold: f64,
    pub function_abs_tol: f64,
    pub function_window: usize,
}

impl ConvergenceSettings {
    /// Construct validated convergence settings.
    ///
    /// # Rules
    /// - Tolerances must be **finite and strictly positive**.
    /// - Iteration counts must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxIter`], [`OptError::InvalidTolGrad`],
    ///   [`OptError::InvalidFunctionTol`], [`OptError::InvalidFunctionWindow`].
    pub fn new(
        max_major_iterations: usize, gradient_threshold: f64, function_abs_tol: f64,
        function_window: usize,
    ) -> OptResult<Self> {
        verify_max_iter(max_major_iterations)?;
        verify_tol_grad(gradient_threshold)?;
        verify_function_tol(function_abs_tol)?;
        verify_function_window(function_window)?;
        Ok(Self { max_major_iterations, gradient_threshold, function_abs_tol, function_window })
    }

    /// Re-run the constructor checks on a value built with a struct literal.
    pub fn validate(&self) -> OptResult<()> {
        Self::new(
            self.max_major_iterations,
            self.gradient_threshold,
            self.function_abs_tol,
            self.function_window,
        )
        .map(|_| ())
    }
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        Self {
            max_major_iterations: 100_000,
            gradient_threshold: 1e-12,
            function_abs_tol: 1e-12,
            function_window: 100_000,
        }
    }
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `cost`: best cost `c(θ̂)`.
/// - `converged`: `true` only for `SolverConverged` or `TargetCostReached`;
///   `false` for the iteration cap, a solver exit (e.g. a failed line
///   search), an interrupt, a timeout, or a run that never terminated.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`, e.g.
///   `cost_count`, `gradient_count`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingResult {
    pub theta_hat: Theta,
    pub cost: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl TrainingResult {
    /// Build a validated [`TrainingResult`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `cost` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `cost`.
    pub fn new(
        theta_hat_opt: Option<Theta>, cost: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(cost)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(
                reason @ (TerminationReason::SolverConverged | TerminationReason::TargetCostReached),
            ) => (true, format!("{reason:?}")),
            TerminationStatus::Terminated(reason) => (false, format!("{reason:?}")),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, cost, converged, status, iterations, fn_evals, grad_norm })
    }
}
