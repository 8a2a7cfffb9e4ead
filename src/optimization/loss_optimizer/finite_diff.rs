//! loss_optimizer::finite_diff — finite-difference gradient helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient approximations around a parameter
//! vector, together with error capture and validation, so that the adapter
//! can train losses without an analytic gradient and tests can check
//! hand-derived gradients, all without depending directly on the
//! `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - [`run_central_diff`]: central differences, second-order accurate; the
//!   preferred path.
//! - [`run_fd_diff`]: forward differences; the fallback when the central
//!   stencil steps into a region where the cost fails.
//! - Both capture errors raised inside the evaluation closure and validate
//!   the resulting gradient.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the objective during differencing is routed into
//!   the shared `closure_err` cell and treated as a hard failure.
//! - Gradients returned from this module satisfy [`validate_grad`].
//!
//! Conventions
//! -----------
//! - The FD closure must return `f64`, so callers store the first error in
//!   `closure_err` and return `NaN`; these helpers turn the captured error
//!   back into an [`OptError`](crate::optimization::errors::OptError).
use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{Grad, Theta, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// run_central_diff — central-difference gradient with error capture and
/// validation.
///
/// Parameters
/// ----------
/// - `theta`: point at which the gradient is approximated; its length is
///   the expected gradient dimension.
/// - `func`: scalar objective; expected to write any evaluation error into
///   `closure_err` and return `NaN`.
/// - `closure_err`: shared error slot, cleared on entry and inspected after
///   differencing.
///
/// Errors
/// ------
/// - The captured closure error, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_central_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.central_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// run_fd_diff — forward-difference gradient with error capture and
/// validation.
///
/// Same contract as [`run_central_diff`], using the one-sided stencil
/// `(f(θ + h·e_j) − f(θ)) / h`, which never evaluates `θ − h·e_j`.
///
/// Examples
/// --------
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::Array1;
/// # use rust_regression::optimization::loss_optimizer::Theta;
/// # use rust_regression::optimization::loss_optimizer::finite_diff::run_fd_diff;
/// let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
///
/// let f = |x: &Theta| x.dot(x);
///
/// let grad = run_fd_diff(&theta, &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), theta.len());
/// ```
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}
