//! loss_optimizer::converge — windowed function-value convergence.
//!
//! Purpose
//! -------
//! Argmin's quasi-Newton solvers stop on a gradient-norm threshold, on a
//! single-step cost change, or on the iteration cap. Training additionally
//! needs a *windowed* rule: stop once the best cost has failed to improve
//! by more than an absolute tolerance for a given number of consecutive
//! major iterations. [`FunctionConvergence`] adds that rule by wrapping any
//! argmin solver.
//!
//! Key behaviors
//! -------------
//! - Delegates `init` and `next_iter` to the wrapped solver unchanged.
//! - Asks the wrapped solver's own `terminate` first; its criteria
//!   (gradient threshold, cost change) always take precedence.
//! - Tracks the best cost seen so far. An iteration counts as an
//!   improvement only when the best cost drops by more than `abs_tol`; any
//!   improvement resets the stall counter. Once the counter reaches
//!   `window`, the run terminates with `SolverConverged`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `abs_tol > 0` and `window > 0`; both are validated upstream by
//!   `ConvergenceSettings::new`.
//! - The first `terminate` call (before the first iteration) only records
//!   the initial best cost.
use argmin::core::{Error, KV, Problem, Solver, State, TerminationReason, TerminationStatus};

/// Solver wrapper adding a stalled-best-cost stopping rule.
#[derive(Debug, Clone)]
pub struct FunctionConvergence<S> {
    inner: S,
    abs_tol: f64,
    window: usize,
    best: Option<f64>,
    stalled: usize,
}

impl<S> FunctionConvergence<S> {
    /// Wrap `inner`, terminating after `window` consecutive iterations
    /// without an improvement larger than `abs_tol`.
    pub fn new(inner: S, abs_tol: f64, window: usize) -> Self {
        Self { inner, abs_tol, window, best: None, stalled: 0 }
    }

    /// Record the latest best cost and report whether the window is spent.
    fn observe(&mut self, cost: f64) -> bool {
        let best = match self.best {
            None => {
                self.best = Some(cost);
                return false;
            }
            Some(best) => best,
        };
        if cost < best && best - cost > self.abs_tol {
            self.best = Some(cost);
            self.stalled = 0;
            return false;
        }
        self.stalled += 1;
        self.stalled >= self.window
    }
}

impl<O, S, I> Solver<O, I> for FunctionConvergence<S>
where
    S: Solver<O, I>,
    I: State<Float = f64>,
{
    const NAME: &'static str = <S as Solver<O, I>>::NAME;

    fn init(&mut self, problem: &mut Problem<O>, state: I) -> Result<(I, Option<KV>), Error> {
        self.best = None;
        self.stalled = 0;
        self.inner.init(problem, state)
    }

    fn next_iter(&mut self, problem: &mut Problem<O>, state: I) -> Result<(I, Option<KV>), Error> {
        self.inner.next_iter(problem, state)
    }

    fn terminate(&mut self, state: &I) -> TerminationStatus {
        let inner_status = self.inner.terminate(state);
        if inner_status.terminated() {
            return inner_status;
        }
        if self.observe(state.get_best_cost()) {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        TerminationStatus::NotTerminated
    }
}
