//! Adapter that exposes a user `EmpiricalLoss` as an `argmin` problem.
//!
//! The cost is passed through unchanged. The gradient is normalized to
//! `∇c(θ)` according to the loss's [`GradientForm`]: losses that report the
//! descent direction `-∇c(θ)` are negated here. If a loss provides no
//! analytic gradient, we finite-difference the cost closure instead, which
//! already yields `∇c(θ)`.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loss_optimizer::{
        finite_diff::{run_central_diff, run_fd_diff},
        traits::{EmpiricalLoss, GradientForm},
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a user `EmpiricalLoss` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `c(θ)` and rejects non-finite values.
/// - `Gradient::gradient` returns `∇c(θ)`, either from the analytic
///   evaluator (sign-normalized) or from finite differences.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: EmpiricalLoss> {
    pub f: &'a F,
}

impl<'a, F: EmpiricalLoss> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the loss's `value` via `?`.
    /// - Returns `NonFiniteCost` if the value is NaN or infinite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: EmpiricalLoss> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - The analytic evaluator writes into a fresh zeroed buffer; the result
    ///   is validated and negated for `GradientForm::DescentDirection`.
    /// - On `GradientNotImplemented`, central differences of the cost are
    ///   tried first. If any cost evaluation inside the stencil failed, or
    ///   the result fails validation, we retry once with forward differences.
    ///
    /// # Errors
    /// - Propagates loss errors from `grad` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates cost errors raised during the forward-difference retry.
    /// - Returns validation errors for wrong dimension or non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        let mut grad = Grad::zeros(dim);
        match self.f.grad(theta, &mut grad) {
            Ok(()) => {
                validate_grad(&grad, dim)?;
                match F::GRADIENT_FORM {
                    GradientForm::CostGradient => Ok(grad),
                    GradientForm::DescentDirection => Ok(-grad),
                }
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                match run_central_diff(theta, &cost_func, &closure_err) {
                    Ok(fd_grad) => Ok(fd_grad),
                    Err(_) => Ok(run_fd_diff(theta, &cost_func, &closure_err)?),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: EmpiricalLoss> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `EmpiricalLoss`.
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }
}
