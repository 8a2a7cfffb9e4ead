//! regression — datasets, hypotheses, and the linear/logistic trainers.
//!
//! Purpose
//! -------
//! Fit a parametric model to a fixed dataset by minimizing an empirical
//! loss, then predict on new inputs with the fitted parameter vector.
//!
//! Key behaviors
//! -------------
//! - [`core`] validates data ([`Dataset`]), defines the pluggable
//!   [`Hypothesis`], and holds the shared [`ModelState`].
//! - [`models`] provides [`LinearRegression`] and [`LogisticRegression`].
//! - [`errors`] defines [`RegressionError`], which converts into
//!   `OptError::Regression` when raised inside an optimizer run.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::array;
//! use rust_regression::regression::prelude::*;
//!
//! let data = Dataset::new(array![[1.0], [2.0], [3.0], [4.0]], array![2.0, 4.0, 6.0, 8.0])?;
//! let mut model = LinearRegression::new(data);
//! let result = model.minimize(None)?;
//! assert!((result.theta_hat[0] - 2.0).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{Dataset, DotProduct, FnHypothesis, Hypothesis, ModelState};
pub use self::errors::{RegressionError, RegressionResult};
pub use self::models::{LinearRegression, LogisticRegression};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_regression::regression::prelude::*;
//
// to import the main regression surface in a single line.

pub mod prelude {
    pub use super::{
        Dataset, DotProduct, FnHypothesis, Hypothesis, LinearRegression, LogisticRegression,
        ModelState, RegressionError, RegressionResult,
    };
    pub use crate::optimization::loss_optimizer::{
        ConvergenceSettings, LineSearcher, QuasiNewton, SolverOptions, TrainingResult,
    };
}
