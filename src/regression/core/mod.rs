//! Core regression building blocks — data, hypotheses, shared model state,
//! and validation.
//!
//! Purpose
//! -------
//! Collect the model-independent pieces both trainers are built from:
//! - [`data`]: the validated [`Dataset`] container,
//! - [`hypothesis`]: the [`Hypothesis`] trait and its implementations,
//! - [`state`]: [`ModelState`], owned by every trainer,
//! - [`validation`]: reusable checks returning `RegressionError`.
//!
//! Downstream usage
//! ----------------
//! - `models` builds `LinearRegression` and `LogisticRegression` on top of
//!   [`ModelState`].
//! - Callers only need [`Dataset`] and, for custom scores, [`FnHypothesis`].

pub mod data;
pub mod hypothesis;
pub mod state;
pub mod validation;

pub use self::data::Dataset;
pub use self::hypothesis::{DotProduct, FnHypothesis, Hypothesis};
pub use self::state::{DEFAULT_LEARNING_RATE, ModelState};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_regression::regression::core::prelude::*;
//
// to import the core surface in a single line.

pub mod prelude {
    pub use super::data::Dataset;
    pub use super::hypothesis::{DotProduct, FnHypothesis, Hypothesis};
    pub use super::state::ModelState;
}
