//! optimization — loss minimization, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model training, combining an
//! Argmin-backed quasi-Newton minimizer, numerically stable transforms, and
//! a single error/result surface. Callers implement an empirical loss,
//! choose stopping rules, and obtain fitted parameters and diagnostics
//! without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing empirical losses** `c(θ)`
//!   (`loss_optimizer`), including solver selection and stopping criteria.
//! - Supply shared numerical primitives (`numerical_stability`) such as an
//!   overflow-safe logistic function.
//! - Normalize configuration issues, numerical failures, model errors, and
//!   backend solver errors into a single enum (`errors::OptError`) with a
//!   common result alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - Progress and outcomes are reported through the `log` facade; terminal
//!   iteration tracing is available behind the `obs_slog` feature.
//!
//! Downstream usage
//! ----------------
//! - Regression models implement `EmpiricalLoss` and call `minimize` with
//!   an initial θ, `ConvergenceSettings`, and `SolverOptions`.
//! - Front-ends typically import `optimization::prelude::*`, which forwards
//!   the submodule preludes and the core error types.

pub mod errors;
pub mod loss_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_regression::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loss_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
