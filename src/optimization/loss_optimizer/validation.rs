//! Validation helpers for empirical-loss optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Settings checks**: [`verify_tol_grad`], [`verify_function_tol`],
//!   [`verify_max_iter`], [`verify_function_window`] ensure convergence
//!   settings are finite and strictly positive.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks cost outputs for
//!   finiteness.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::optimization::{
    errors::{OptError, OptResult},
    loss_optimizer::{Grad, Theta},
};

/// Validate the gradient-norm threshold.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the absolute function-convergence tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidFunctionTol`] if the value is non-finite or ≤ 0.0.
pub fn verify_function_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidFunctionTol { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidFunctionTol { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the major-iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the function-convergence iteration window.
///
/// # Errors
/// Returns [`OptError::InvalidFunctionWindow`] if `window == 0`.
pub fn verify_function_window(window: usize) -> OptResult<()> {
    if window == 0 {
        return Err(OptError::InvalidFunctionWindow {
            window,
            reason: "Window must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar cost value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn settings_checks_reject_non_positive_and_non_finite_values() {
        assert!(verify_tol_grad(1e-12).is_ok());
        assert!(matches!(verify_tol_grad(0.0), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(f64::NAN), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_function_tol(-1.0), Err(OptError::InvalidFunctionTol { .. })));
        assert!(matches!(verify_max_iter(0), Err(OptError::InvalidMaxIter { .. })));
        assert!(matches!(verify_function_window(0), Err(OptError::InvalidFunctionWindow { .. })));
        assert!(verify_function_window(1).is_ok());
    }

    #[test]
    fn validate_grad_reports_first_non_finite_entry() {
        let grad = array![0.0, f64::INFINITY, f64::NAN];

        let err = validate_grad(&grad, 3).expect_err("non-finite gradient must be rejected");

        assert!(matches!(err, OptError::InvalidGradient { index: 1, .. }));
        assert_eq!(
            validate_grad(&array![1.0], 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn validate_theta_hat_requires_present_finite_vector() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(validate_theta_hat(Some(array![1.0, f64::NAN])).is_err());
        assert_eq!(validate_theta_hat(Some(array![1.0, 2.0])), Ok(array![1.0, 2.0]));
        assert!(validate_value(f64::NEG_INFINITY).is_err());
    }
}
