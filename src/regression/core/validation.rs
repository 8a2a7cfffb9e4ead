//! Regression validation helpers — reusable checks for parameters, inputs,
//! and model configuration.
//!
//! Purpose
//! -------
//! Centralize the small checks shared by `ModelState` and both trainers so
//! constructors, builders, and evaluators fail fast with structured
//! [`RegressionError`] values.
//!
//! Conventions
//! -----------
//! - Every helper returns [`RegressionResult<()>`] and reports the first
//!   offending element.
//! - No I/O and no logging.
use crate::regression::errors::{RegressionError, RegressionResult};
use ndarray::ArrayView1;

/// Check that `theta` has length `n` and only finite entries.
///
/// Errors
/// ------
/// - `ThetaLengthMismatch { expected: n, found }`
/// - `NonFiniteTheta { index, value }`
pub fn validate_theta(theta: ArrayView1<'_, f64>, n: usize) -> RegressionResult<()> {
    if theta.len() != n {
        return Err(RegressionError::ThetaLengthMismatch { expected: n, found: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(RegressionError::NonFiniteTheta { index, value });
        }
    }
    Ok(())
}

/// Check that a prediction input has exactly `n` features, all finite.
pub fn validate_features(features: ArrayView1<'_, f64>, n: usize) -> RegressionResult<()> {
    if features.len() != n {
        return Err(RegressionError::FeatureLengthMismatch { expected: n, found: features.len() });
    }
    for (col, &value) in features.iter().enumerate() {
        if !value.is_finite() {
            return Err(RegressionError::NonFiniteFeature { row: 0, col, value });
        }
    }
    Ok(())
}

pub fn validate_grad_buffer(len: usize, n: usize) -> RegressionResult<()> {
    if len != n {
        return Err(RegressionError::GradientBufferMismatch { expected: n, found: len });
    }
    Ok(())
}

/// Learning rate must be finite and strictly positive.
pub fn validate_learning_rate(value: f64) -> RegressionResult<()> {
    if !value.is_finite() {
        return Err(RegressionError::InvalidLearningRate { value, reason: "must be finite" });
    }
    if value <= 0.0 {
        return Err(RegressionError::InvalidLearningRate { value, reason: "must be > 0" });
    }
    Ok(())
}

/// Decision threshold must lie in (0, 1]; exactly 0 is accepted and means
/// "unset".
pub fn validate_threshold(value: f64) -> RegressionResult<()> {
    if !value.is_finite() {
        return Err(RegressionError::InvalidThreshold { value, reason: "must be finite" });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(RegressionError::InvalidThreshold { value, reason: "must lie in [0, 1]" });
    }
    Ok(())
}

/// Classification targets must lie in [0, 1].
pub fn validate_probability_targets(targets: ArrayView1<'_, f64>) -> RegressionResult<()> {
    for (index, &value) in targets.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            return Err(RegressionError::TargetOutOfRange { index, value });
        }
    }
    Ok(())
}
