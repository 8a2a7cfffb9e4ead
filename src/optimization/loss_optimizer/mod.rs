//! loss_optimizer — argmin-powered quasi-Newton minimizer for empirical losses.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing
//! empirical losses** `c(θ)`. Callers implement a single trait,
//! [`EmpiricalLoss`], and invoke [`minimize`] to run BFGS or L-BFGS with a
//! configurable line search, stopping rules, and finite-difference
//! fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert user losses into Argmin-compatible problems via
//!   [`adapter::ArgMinAdapter`], normalizing the gradient sign declared by
//!   [`GradientForm`].
//! - Expose a single, user-facing entrypoint [`minimize`] that:
//!   - validates settings and the initial guess,
//!   - selects a solver via [`builders`] from [`SolverOptions`],
//!   - executes it via [`run`] with the windowed stall rule from
//!     [`converge`], and
//!   - normalizes results into a [`TrainingResult`].
//! - Provide finite-difference gradients in [`finite_diff`] for losses
//!   without analytic derivatives.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`EmpiricalLoss::value`] and [`EmpiricalLoss::grad`] treat invalid
//!   inputs as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - Configuration types ([`ConvergenceSettings`], [`SolverOptions`]) are
//!   validated on construction; [`minimize`] re-validates settings because
//!   their fields are public.
//! - A run that stops on the iteration cap is an error, not a result.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`); gradients are [`Grad`].
//! - [`TrainingResult::cost`] is the minimized loss itself.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign handling in [`adapter`], solver
//!   construction in [`builders`], the stall rule in [`converge`], FD
//!   helpers, validation, and end-to-end runs on toy losses in [`api`] and
//!   [`run`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod converge;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{
    ConvergenceSettings, EmpiricalLoss, GradientForm, LineSearcher, QuasiNewton, SolverOptions,
    TrainingResult,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, InvHessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_regression::optimization::loss_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        ConvergenceSettings, EmpiricalLoss, GradientForm, LineSearcher, QuasiNewton,
        SolverOptions, TrainingResult,
    };
    pub use super::types::{Cost, Grad, Theta};
}
