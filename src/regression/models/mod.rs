//! models — linear and logistic regression trainers.
//!
//! Purpose
//! -------
//! Collect the user-facing trainers. Both own a `ModelState` from
//! `regression::core`, implement `EmpiricalLoss`, and train through the
//! quasi-Newton `minimize` driver.
//!
//! Key behaviors
//! -------------
//! - [`LinearRegression`]: squared-error cost, descent-direction gradient,
//!   raw-score prediction.
//! - [`LogisticRegression`]: cross-entropy cost guarded against log-domain
//!   failures, cost gradient, thresholded prediction plus `probability`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A trainer is either untrained (`results() == None`) or trained; a
//!   failed `minimize` never leaves a partially updated model.
//! - Loss and gradient evaluations read the trial θ handed to them and
//!   never the stored θ.

pub mod linear;
pub mod logistic;

pub use self::linear::LinearRegression;
pub use self::logistic::{DEFAULT_THRESHOLD, LogisticRegression};
