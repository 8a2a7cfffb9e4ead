//! loss_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! empirical-loss optimizer. By defining these in one place, the rest of
//! the optimization code can stay agnostic to `ndarray` and Argmin
//! generics and can more easily evolve if the backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients, inverse
//!   Hessian approximations, and scalar costs (`Theta`, `Grad`,
//!   `InvHessian`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose pre-wired BFGS and L-BFGS solver aliases for both line-search
//!   strategies, using the common `(Theta, Grad, Cost)` numeric shapes.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors and matrices are represented as `ndarray`
//!   containers over `f64`.
//! - `Cost` is the loss being minimized; no sign flips happen at this
//!   level.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` have length equal to the number of features.
//! - `InvHessian` is the dense `n × n` BFGS inverse-Hessian estimate; it
//!   is seeded with the identity by the runner.
//! - `DEFAULT_LBFGS_MEM` encodes the typical history size for L-BFGS.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::{BFGS, LBFGS},
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient vector `∇c(θ)`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Dense inverse-Hessian approximation carried by BFGS; `n × n`.
pub type InvHessian = Array2<f64>;

/// Scalar objective value minimized by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// BFGS solver wired to the Hager–Zhang line search.
pub type BfgsHagerZhang = BFGS<HagerZhangLS, Cost>;

/// BFGS solver wired to the More–Thuente line search.
pub type BfgsMoreThuente = BFGS<MoreThuenteLS, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
