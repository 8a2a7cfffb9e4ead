//! numerical_stability — guarded nonlinear transforms for the loss layer.
//!
//! Purpose
//! -------
//! Collect the small numeric primitives whose naïve forms overflow or lose
//! precision, so loss implementations can call a single vetted version.
//!
//! Key behaviors
//! -------------
//! - [`safe_logistic`]: the sigmoid link used by logistic regression for
//!   both its cross-entropy loss and its classification rule.
//! - [`safe_softplus`]: `ln(1 + exp(x))`, the overflow-free building block of
//!   the cross-entropy evaluated during training.
//!
//! Invariants & assumptions
//! ------------------------
//! - All functions are pure, allocation-free, and total on finite `f64`
//!   inputs.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with the naïve
//!   formulas on safe grids, symmetry, and tail behavior.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{safe_logistic, safe_softplus};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_regression::optimization::numerical_stability::prelude::*;
//
// to import the numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{safe_logistic, safe_softplus};
}
