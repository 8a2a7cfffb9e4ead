//! rust_regression — linear and logistic regression trained by quasi-Newton
//! minimization.
//!
//! Purpose
//! -------
//! Fit a linear or logistic model to an in-memory dataset by minimizing its
//! empirical loss with BFGS or L-BFGS (via `argmin`), then predict with the
//! fitted parameter vector.
//!
//! Key behaviors
//! -------------
//! - [`regression`]: validated datasets, pluggable hypotheses, and the
//!   `LinearRegression` / `LogisticRegression` trainers.
//! - [`optimization`]: the model-agnostic `EmpiricalLoss` trait, the
//!   `minimize` driver with its stopping rules, and the `OptError` surface.
//!
//! Conventions
//! -----------
//! - Fallible operations return `RegressionResult<T>` (model and data
//!   errors) or `OptResult<T>` (anything that ran the optimizer).
//! - The library logs through the `log` facade and never installs a logger.
//!   Enable the `obs_slog` feature and `SolverOptions::verbose` for
//!   per-iteration solver output.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they cover; `tests/` runs end-to-end
//!   training pipelines through the public API.

pub mod optimization;
pub mod regression;
