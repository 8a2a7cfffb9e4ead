//! Linear regression: squared-error loss, descent-direction gradient, and
//! raw-score prediction.
//!
//! The loss is `c(θ) = (1/(2m)) Σ_i (h(x_i, θ) − y_i)²`. The gradient
//! evaluator reports the scaled descent direction
//! `−(α/m) Σ_i (h(x_i, θ) − y_i) x_i`, where `α` is the learning rate, and
//! declares [`GradientForm::DescentDirection`] so the optimizer adapter
//! flips it back into a cost gradient.
use crate::{
    optimization::{
        errors::OptResult,
        loss_optimizer::{
            self, ConvergenceSettings, Cost, EmpiricalLoss, Grad, GradientForm, SolverOptions,
            Theta, TrainingResult,
        },
    },
    regression::{
        core::{
            data::Dataset,
            hypothesis::{DotProduct, Hypothesis},
            state::ModelState,
            validation::validate_grad_buffer,
        },
        errors::RegressionResult,
    },
};
use ndarray::ArrayView1;

/// Least-squares linear regression trained by quasi-Newton minimization.
///
/// Starts untrained (`results() == None`) with θ = 0, learning rate 1, the
/// dot-product hypothesis, and BFGS + More–Thuente. A successful
/// [`minimize`](LinearRegression::minimize) replaces θ and stores the
/// [`TrainingResult`]; a failed one leaves the model as it was.
#[derive(Debug, Clone)]
pub struct LinearRegression<H = DotProduct> {
    state: ModelState<H>,
    solver: SolverOptions,
    results: Option<TrainingResult>,
}

impl LinearRegression<DotProduct> {
    pub fn new(data: Dataset) -> Self {
        LinearRegression {
            state: ModelState::new(data),
            solver: SolverOptions::default(),
            results: None,
        }
    }
}

impl<H: Hypothesis> LinearRegression<H> {
    /// Set the initial guess used by the next `minimize`.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `NonFiniteTheta`.
    pub fn with_initial_theta(mut self, theta: Theta) -> RegressionResult<Self> {
        self.state.set_theta(theta)?;
        Ok(self)
    }

    /// # Errors
    /// - `InvalidLearningRate` unless finite and > 0.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> RegressionResult<Self> {
        self.state.set_learning_rate(learning_rate)?;
        Ok(self)
    }

    pub fn with_hypothesis<H2: Hypothesis>(self, hypothesis: H2) -> LinearRegression<H2> {
        LinearRegression {
            state: self.state.with_hypothesis(hypothesis),
            solver: self.solver,
            results: self.results,
        }
    }

    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    /// Mean squared-error cost `(1/(2m)) Σ (h(x_i, θ) − y_i)²`. Pure.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `NonFiniteTheta` for a malformed θ.
    pub fn cost(&self, theta: &Theta) -> RegressionResult<f64> {
        self.state.check_theta(theta)?;
        let m = self.state.data().n_samples() as f64;
        let sse: f64 = self.state.scored_examples(theta).map(|(_, y, h)| (h - y).powi(2)).sum();
        Ok(sse / (2.0 * m))
    }

    /// Write the descent direction `−(α/m) Σ (h(x_i, θ) − y_i) x_i` into
    /// `grad`.
    ///
    /// The buffer is zeroed first, so repeated calls on one buffer agree.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `NonFiniteTheta` for a malformed θ.
    /// - `GradientBufferMismatch` when `grad.len() != n`.
    pub fn gradient(&self, theta: &Theta, grad: &mut Grad) -> RegressionResult<()> {
        self.state.check_theta(theta)?;
        validate_grad_buffer(grad.len(), self.state.data().n_features())?;
        let scale = self.state.learning_rate() / self.state.data().n_samples() as f64;
        grad.fill(0.0);
        for (x, y, h) in self.state.scored_examples(theta) {
            grad.scaled_add(-scale * (h - y), &x);
        }
        Ok(())
    }

    /// Train from the current θ and store the outcome.
    ///
    /// `None` uses [`ConvergenceSettings::default`]. On success θ becomes
    /// `theta_hat` and a copy of the result is returned.
    ///
    /// # Errors
    /// - Any [`OptError`](crate::optimization::errors::OptError) from the
    ///   optimizer, including `NotConverged` on the iteration cap. The model
    ///   is not modified.
    pub fn minimize(&mut self, settings: Option<&ConvergenceSettings>) -> OptResult<TrainingResult> {
        let defaults = ConvergenceSettings::default();
        let settings = settings.unwrap_or(&defaults);
        log::info!(
            "training linear regression: {} samples, {} features, {:?} with {:?}",
            self.state.data().n_samples(),
            self.state.data().n_features(),
            self.solver.method,
            self.solver.line_searcher
        );
        log::debug!("convergence settings: {settings:?}");

        let theta0 = self.state.theta().clone();
        let outcome = loss_optimizer::minimize(&*self, theta0, settings, &self.solver)
            .inspect_err(|e| log::warn!("linear regression training failed: {e}"))?;
        self.state.set_theta(outcome.theta_hat.clone())?;
        self.results = Some(outcome.clone());
        Ok(outcome)
    }

    /// Raw score `h(x, θ)` for one feature vector.
    ///
    /// # Errors
    /// - `FeatureLengthMismatch` / `NonFiniteFeature`.
    pub fn predict(&self, features: ArrayView1<'_, f64>) -> RegressionResult<f64> {
        self.state.check_features(features)?;
        Ok(self.state.score(features, self.state.theta().view()))
    }

    pub fn theta(&self) -> &Theta {
        self.state.theta()
    }

    pub fn state(&self) -> &ModelState<H> {
        &self.state
    }

    pub fn results(&self) -> Option<&TrainingResult> {
        self.results.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.results.is_some()
    }
}

impl<H: Hypothesis> EmpiricalLoss for LinearRegression<H> {
    const GRADIENT_FORM: GradientForm = GradientForm::DescentDirection;

    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        Ok(self.cost(theta)?)
    }

    fn check(&self, theta: &Theta) -> OptResult<()> {
        Ok(self.state.check_theta(theta)?)
    }

    fn grad(&self, theta: &Theta, grad: &mut Grad) -> OptResult<()> {
        Ok(self.gradient(theta, grad)?)
    }
}
