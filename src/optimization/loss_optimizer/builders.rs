//! loss_optimizer::builders — quasi-Newton solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the BFGS and L-BFGS solvers used by
//! the loss optimizer. These helpers hide Argmin's generic wiring and apply
//! the crate's convergence settings so that higher-level code can request a
//! configured solver without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct BFGS or L-BFGS with either Hager–Zhang or More–Thuente line
//!   search.
//! - Apply `ConvergenceSettings::gradient_threshold` as the solver's
//!   gradient-norm tolerance. The single-step cost tolerance keeps Argmin's
//!   default (machine epsilon); the windowed function-value rule is added
//!   by the runner via `FunctionConvergence`.
//! - Leave the initial parameter vector, inverse Hessian, and maximum
//!   iterations to the runner/executor layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on [`Theta`], [`Grad`], and [`Cost`].
//! - Any tolerance Argmin rejects is surfaced as an [`OptError`] via the
//!   crate's `From<Error>` implementation.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::{BFGS, LBFGS};

use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{
        traits::ConvergenceSettings,
        types::{
            BfgsHagerZhang, BfgsMoreThuente, Cost, Grad, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, Theta,
        },
    },
};

/// Build BFGS with Hager–Zhang line search and the configured gradient
/// threshold.
pub fn build_bfgs_hager_zhang(settings: &ConvergenceSettings) -> OptResult<BfgsHagerZhang> {
    let bfgs = BfgsHagerZhang::new(HagerZhangLS::new());
    configure_bfgs(bfgs, settings)
}

/// Build BFGS with More–Thuente line search and the configured gradient
/// threshold.
pub fn build_bfgs_more_thuente(settings: &ConvergenceSettings) -> OptResult<BfgsMoreThuente> {
    let bfgs = BfgsMoreThuente::new(MoreThuenteLS::new());
    configure_bfgs(bfgs, settings)
}

/// build_lbfgs_hager_zhang — construct L-BFGS with Hager–Zhang line search.
///
/// Parameters
/// ----------
/// - `settings`: source of the gradient-norm tolerance.
/// - `mem`: L-BFGS history size (`m`), validated `> 0` by `SolverOptions`.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects the
///   tolerance.
pub fn build_lbfgs_hager_zhang(
    settings: &ConvergenceSettings, mem: usize,
) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, settings)
}

/// build_lbfgs_more_thuente — construct L-BFGS with More–Thuente line search.
///
/// Same contract as [`build_lbfgs_hager_zhang`].
pub fn build_lbfgs_more_thuente(
    settings: &ConvergenceSettings, mem: usize,
) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, settings)
}

/// Apply the gradient threshold to a BFGS solver, whatever its line search.
pub fn configure_bfgs<L>(
    solver: BFGS<L, Cost>, settings: &ConvergenceSettings,
) -> OptResult<BFGS<L, Cost>> {
    Ok(solver.with_tolerance_grad(settings.gradient_threshold)?)
}

/// Apply the gradient threshold to an L-BFGS solver, whatever its line
/// search.
pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Theta, Grad, Cost>, settings: &ConvergenceSettings,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    Ok(solver.with_tolerance_grad(settings.gradient_threshold)?)
}
