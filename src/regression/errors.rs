//! Errors for regression models (dataset validation, model configuration,
//! parameter checks, and numerical domain failures in the loss).
//!
//! This module defines the model error type, [`RegressionError`], used by the
//! dataset constructors, the linear/logistic trainers, and their loss and
//! gradient evaluators. It implements `Display`/`Error` and converts into
//! [`OptError`](crate::optimization::errors::OptError) when a model failure
//! crosses the optimizer boundary.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/ndarray).
//! - `row` refers to a training example, `col` to a feature column.
//! - Features, targets, and parameters must be **finite**.

/// Crate-wide result alias for regression operations that may produce
/// [`RegressionError`].
pub type RegressionResult<T> = Result<T, RegressionError>;

/// Unified error type for regression modeling.
///
/// Covers dataset validation, model configuration, parameter/shape checks,
/// and numerical domain failures raised while evaluating the loss.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    // ---- Dataset validation ----
    /// The dataset has no examples (m = 0).
    EmptyDataset,

    /// The examples have no feature columns (n = 0).
    NoFeatures,

    /// A feature row has a different length than the first row.
    RaggedFeatures { row: usize, expected: usize, found: usize },

    /// The number of targets differs from the number of examples.
    TargetLengthMismatch { expected: usize, found: usize },

    /// A feature value is NaN/±inf.
    NonFiniteFeature { row: usize, col: usize, value: f64 },

    /// A target value is NaN/±inf.
    NonFiniteTarget { index: usize, value: f64 },

    /// A classification target lies outside [0, 1].
    TargetOutOfRange { index: usize, value: f64 },

    // ---- Parameters and inputs ----
    /// Parameter vector length differs from the feature dimension.
    ThetaLengthMismatch { expected: usize, found: usize },

    /// A parameter value is NaN/±inf.
    NonFiniteTheta { index: usize, value: f64 },

    /// A feature vector passed to `predict` has the wrong length.
    FeatureLengthMismatch { expected: usize, found: usize },

    /// The caller-owned gradient buffer has the wrong length.
    GradientBufferMismatch { expected: usize, found: usize },

    // ---- Model configuration ----
    /// Learning rate must be finite and > 0.
    InvalidLearningRate { value: f64, reason: &'static str },

    /// Decision threshold must lie in (0, 1], or be exactly 0 (unset).
    InvalidThreshold { value: f64, reason: &'static str },

    // ---- Numerical domain ----
    /// A predicted probability hit exactly 0 or 1, so the cross-entropy
    /// logarithm is undefined.
    LogDomain { index: usize, probability: f64 },
}

impl std::error::Error for RegressionError {}

impl std::fmt::Display for RegressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dataset validation ----
            RegressionError::EmptyDataset => {
                write!(f, "Dataset must contain at least one example")
            }
            RegressionError::NoFeatures => {
                write!(f, "Dataset examples must have at least one feature")
            }
            RegressionError::RaggedFeatures { row, expected, found } => {
                write!(f, "Feature row {row} has length {found}, expected {expected}")
            }
            RegressionError::TargetLengthMismatch { expected, found } => {
                write!(f, "Target length mismatch: expected {expected}, found {found}")
            }
            RegressionError::NonFiniteFeature { row, col, value } => {
                write!(f, "Feature at ({row}, {col}) must be finite; got {value}")
            }
            RegressionError::NonFiniteTarget { index, value } => {
                write!(f, "Target at index {index} must be finite; got {value}")
            }
            RegressionError::TargetOutOfRange { index, value } => {
                write!(f, "Classification target at index {index} must lie in [0, 1]; got {value}")
            }

            // ---- Parameters and inputs ----
            RegressionError::ThetaLengthMismatch { expected, found } => {
                write!(f, "Theta length mismatch: expected {expected}, found {found}")
            }
            RegressionError::NonFiniteTheta { index, value } => {
                write!(f, "Theta at index {index} must be finite; got {value}")
            }
            RegressionError::FeatureLengthMismatch { expected, found } => {
                write!(f, "Feature vector length mismatch: expected {expected}, found {found}")
            }
            RegressionError::GradientBufferMismatch { expected, found } => {
                write!(f, "Gradient buffer length mismatch: expected {expected}, found {found}")
            }

            // ---- Model configuration ----
            RegressionError::InvalidLearningRate { value, reason } => {
                write!(f, "Invalid learning rate {value}: {reason}")
            }
            RegressionError::InvalidThreshold { value, reason } => {
                write!(f, "Invalid decision threshold {value}: {reason}")
            }

            // ---- Numerical domain ----
            RegressionError::LogDomain { index, probability } => {
                write!(
                    f,
                    "Cross-entropy undefined at example {index}: predicted probability is {probability}"
                )
            }
        }
    }
}
