//! Logistic regression: cross-entropy loss, cost gradient, and thresholded
//! prediction.
//!
//! With `p_i = σ(h(x_i, θ))` the loss is
//! `c(θ) = (1/m) Σ_i [−y_i ln p_i − (1 − y_i) ln(1 − p_i)]` and the gradient
//! evaluator reports `(α/m) Σ_i (p_i − y_i) x_i`, the cost gradient scaled
//! by the learning rate `α`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Targets lie in [0, 1]; checked by [`LogisticRegression::new`].
//! - A probability that rounds to exactly 0 or 1 makes the loss undefined;
//!   `cost` reports it as `RegressionError::LogDomain` instead of returning
//!   an infinite or NaN value.
//! - The optimizer sees the same loss written as
//!   `(1/m) Σ_i [softplus(z_i) − y_i z_i]`, which is finite for any finite
//!   score, so saturated line-search trial points do not end training.
//! - The decision threshold lies in [0, 1]; 0 means unset and behaves as
//!   0.5.
use crate::{
    optimization::{
        errors::OptResult,
        loss_optimizer::{
            self, ConvergenceSettings, Cost, EmpiricalLoss, Grad, GradientForm, SolverOptions,
            Theta, TrainingResult,
        },
        numerical_stability::{safe_logistic, safe_softplus},
    },
    regression::{
        core::{
            data::Dataset,
            hypothesis::{DotProduct, Hypothesis},
            state::ModelState,
            validation::{validate_grad_buffer, validate_probability_targets, validate_threshold},
        },
        errors::{RegressionError, RegressionResult},
    },
};
use ndarray::{Array1, ArrayView1};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Binary logistic regression trained by quasi-Newton minimization.
///
/// Same lifecycle as [`LinearRegression`](super::linear::LinearRegression):
/// untrained until a successful [`minimize`](LogisticRegression::minimize),
/// which replaces θ and stores the [`TrainingResult`].
#[derive(Debug, Clone)]
pub struct LogisticRegression<H = DotProduct> {
    state: ModelState<H>,
    solver: SolverOptions,
    threshold: f64,
    results: Option<TrainingResult>,
}

impl LogisticRegression<DotProduct> {
    /// # Errors
    /// - `TargetOutOfRange` for the first target outside [0, 1].
    pub fn new(data: Dataset) -> RegressionResult<Self> {
        validate_probability_targets(data.targets().view())?;
        Ok(LogisticRegression {
            state: ModelState::new(data),
            solver: SolverOptions::default(),
            threshold: DEFAULT_THRESHOLD,
            results: None,
        })
    }
}

impl<H: Hypothesis> LogisticRegression<H> {
    pub fn with_initial_theta(mut self, theta: Theta) -> RegressionResult<Self> {
        self.state.set_theta(theta)?;
        Ok(self)
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> RegressionResult<Self> {
        self.state.set_learning_rate(learning_rate)?;
        Ok(self)
    }

    pub fn with_hypothesis<H2: Hypothesis>(self, hypothesis: H2) -> LogisticRegression<H2> {
        LogisticRegression {
            state: self.state.with_hypothesis(hypothesis),
            solver: self.solver,
            threshold: self.threshold,
            results: self.results,
        }
    }

    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    /// Set the decision threshold used by `predict`.
    ///
    /// # Errors
    /// - `InvalidThreshold` outside [0, 1]. Exactly 0 restores the default.
    pub fn with_threshold(mut self, threshold: f64) -> RegressionResult<Self> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    /// Threshold actually applied by `predict`.
    pub fn threshold(&self) -> f64 {
        if self.threshold == 0.0 { DEFAULT_THRESHOLD } else { self.threshold }
    }

    /// Mean cross-entropy cost. Pure.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `NonFiniteTheta` for a malformed θ.
    /// - `LogDomain { index, probability }` for the first example whose
    ///   predicted probability is exactly 0 or 1.
    pub fn cost(&self, theta: &Theta) -> RegressionResult<f64> {
        self.state.check_theta(theta)?;
        let m = self.state.data().n_samples() as f64;
        let mut total = 0.0;
        for (index, (_, y, z)) in self.state.scored_examples(theta).enumerate() {
            let p = safe_logistic(z);
            if p <= 0.0 || p >= 1.0 {
                return Err(RegressionError::LogDomain { index, probability: p });
            }
            total += -y * p.ln() - (1.0 - y) * (1.0 - p).ln();
        }
        Ok(total / m)
    }

    /// Mean cross-entropy as `(1/m) Σ [softplus(z_i) − y_i z_i]`.
    ///
    /// Equal to [`cost`](Self::cost) wherever that is defined, and finite
    /// where `cost` reports `LogDomain`.
    fn training_cost(&self, theta: &Theta) -> RegressionResult<f64> {
        self.state.check_theta(theta)?;
        let m = self.state.data().n_samples() as f64;
        let total: f64 =
            self.state.scored_examples(theta).map(|(_, y, z)| safe_softplus(z) - y * z).sum();
        Ok(total / m)
    }

    /// Write `(α/m) Σ (σ(h(x_i, θ)) − y_i) x_i` into `grad`, overwriting
    /// its previous contents.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `NonFiniteTheta` for a malformed θ.
    /// - `GradientBufferMismatch` when `grad.len() != n`.
    pub fn gradient(&self, theta: &Theta, grad: &mut Grad) -> RegressionResult<()> {
        self.state.check_theta(theta)?;
        validate_grad_buffer(grad.len(), self.state.data().n_features())?;
        let scale = self.state.learning_rate() / self.state.data().n_samples() as f64;
        let residuals: Array1<f64> =
            self.state.scored_examples(theta).map(|(_, y, z)| safe_logistic(z) - y).collect();
        grad.assign(&self.state.data().features().t().dot(&residuals));
        grad.mapv_inplace(|g| g * scale);
        Ok(())
    }

    /// Train from the current θ and store the outcome.
    ///
    /// `None` uses [`ConvergenceSettings::default`].
    ///
    /// # Errors
    /// - Any [`OptError`](crate::optimization::errors::OptError) from the
    ///   optimizer, including `NotConverged` when a line search breaks
    ///   down. The model is not modified.
    pub fn minimize(&mut self, settings: Option<&ConvergenceSettings>) -> OptResult<TrainingResult> {
        let defaults = ConvergenceSettings::default();
        let settings = settings.unwrap_or(&defaults);
        log::info!(
            "training logistic regression: {} samples, {} features, {:?} with {:?}",
            self.state.data().n_samples(),
            self.state.data().n_features(),
            self.solver.method,
            self.solver.line_searcher
        );
        log::debug!("convergence settings: {settings:?}");

        let theta0 = self.state.theta().clone();
        let outcome = loss_optimizer::minimize(&*self, theta0, settings, &self.solver)
            .inspect_err(|e| log::warn!("logistic regression training failed: {e}"))?;
        self.state.set_theta(outcome.theta_hat.clone())?;
        self.results = Some(outcome.clone());
        Ok(outcome)
    }

    /// `σ(h(x, θ))` for one feature vector.
    ///
    /// # Errors
    /// - `FeatureLengthMismatch` / `NonFiniteFeature`.
    pub fn probability(&self, features: ArrayView1<'_, f64>) -> RegressionResult<f64> {
        self.state.check_features(features)?;
        Ok(safe_logistic(self.state.score(features, self.state.theta().view())))
    }

    /// `true` when `σ(h(x, θ)) >= threshold`.
    pub fn predict(&self, features: ArrayView1<'_, f64>) -> RegressionResult<bool> {
        Ok(self.probability(features)? >= self.threshold())
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

impl<H: Hypothesis> EmpiricalLoss for LogisticRegression<H> {
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        Ok(self.training_cost(theta)?)
    }

    fn check(&self, theta: &Theta) -> OptResult<()> {
        Ok(self.state.check_theta(theta)?)
    }

    fn grad(&self, theta: &Theta, grad: &mut Grad) -> OptResult<()> {
        Ok(self.gradient(theta, grad)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loss_optimizer::{LineSearcher, QuasiNewton};
    use finitediff::FiniteDiff;
    use ndarray::{Array2, array};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Target validation, the log-domain guard, and the finite training
    //   loss used by the optimizer.
    // - The analytic gradient against finite differences.
    // - Threshold semantics for prediction.
    // - Training on overlapping (non-separable) classes with every solver,
    //   on unscaled features, and from a saturated start.
    // -------------------------------------------------------------------------

    /// Rows `[1, x]` with overlapping classes, so the MLE is finite.
    fn overlapping_classes() -> Dataset {
        let xs = [-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5];
        let ys = [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
        let rows = xs.iter().map(|&x| vec![1.0, x]).collect();
        Dataset::from_rows(rows, ys.to_vec()).expect("valid dataset")
    }

    fn random_dataset(rng: &mut StdRng, m: usize, n: usize) -> Dataset {
        let features = Array2::from_shape_fn((m, n), |(_, j)| {
            if j == 0 { 1.0 } else { rng.random_range(-1.0..1.0) }
        });
        let targets = Array1::from_shape_fn(m, |_| if rng.random_bool(0.5) { 1.0 } else { 0.0 });
        Dataset::new(features, targets).expect("valid dataset")
    }

    #[test]
    // Purpose
    // -------
    // Ensure classification targets outside [0, 1] are rejected up front.
    //
    // Given
    // -----
    // - Targets [0, 1, 3].
    //
    // Expect
    // ------
    // - `TargetOutOfRange { index: 2, value: 3.0 }`.
    fn new_rejects_targets_outside_unit_interval() {
        let data = Dataset::new(array![[1.0], [2.0], [3.0]], array![0.0, 1.0, 3.0])
            .expect("valid dataset");

        let err = LogisticRegression::new(data).expect_err("target 3 is not a probability");

        assert_eq!(err, RegressionError::TargetOutOfRange { index: 2, value: 3.0 });
    }

    #[test]
    // Purpose
    // -------
    // Pin the cost at θ = 0 and the log-domain guard at saturation.
    //
    // Given
    // -----
    // - The overlapping dataset at θ = [0, 0] (every p = 0.5).
    // - θ = [100, 0], which saturates σ to exactly 1.
    //
    // Expect
    // ------
    // - Cost ln 2 at θ = 0.
    // - `LogDomain { index: 0, probability: 1.0 }` at saturation.
    fn cost_is_ln2_at_origin_and_guards_saturation() {
        let model = LogisticRegression::new(overlapping_classes()).expect("valid model");

        let at_origin = model.cost(&array![0.0, 0.0]).expect("cost");
        let saturated = model.cost(&array![100.0, 0.0]);

        assert!((at_origin - std::f64::consts::LN_2).abs() < 1e-12);
        assert_eq!(saturated, Err(RegressionError::LogDomain { index: 0, probability: 1.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify the analytic gradient against central finite differences.
    //
    // Given
    // -----
    // - 25 random examples with 4 features, learning rate 1.
    // - 10 random θ in [-1, 1]⁴ drawn from a seeded RNG.
    //
    // Expect
    // ------
    // - Agreement within 1e-4 and non-negative cost at every point.
    fn gradient_matches_finite_differences() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(3);
        let model = LogisticRegression::new(random_dataset(&mut rng, 25, 4)).expect("valid model");

        for _ in 0..10 {
            let theta = Array1::from_shape_fn(4, |_| rng.random_range(-1.0..1.0));
            let mut grad = Grad::zeros(4);

            // Act
            model.gradient(&theta, &mut grad).expect("gradient");
            let fd = theta.central_diff(&|t: &Theta| model.cost(t).expect("cost"));

            // Assert
            assert!(model.cost(&theta).expect("cost") >= 0.0);
            for j in 0..4 {
                assert!(
                    (grad[j] - fd[j]).abs() < 1e-4,
                    "component {j}: analytic {} vs FD {}",
                    grad[j],
                    fd[j]
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Guard against accumulation across calls sharing one buffer.
    //
    // Given
    // -----
    // - A buffer pre-filled with garbage and reused for two calls.
    //
    // Expect
    // ------
    // - Both calls produce the same gradient.
    fn gradient_overwrites_buffer() {
        let model = LogisticRegression::new(overlapping_classes()).expect("valid model");
        let theta = array![0.2, -0.4];
        let mut grad = array![7.0, 7.0];

        model.gradient(&theta, &mut grad).expect("gradient");
        let first = grad.clone();
        model.gradient(&theta, &mut grad).expect("gradient");

        assert_eq!(grad, first);
    }

    #[test]
    // Purpose
    // -------
    // Verify threshold semantics for prediction.
    //
    // Given
    // -----
    // - θ = [0.3, 1.2] and 200 random inputs [1, x] with x ∈ [-3, 3].
    // - Thresholds 0 (unset), 0.5, and 0.9.
    //
    // Expect
    // ------
    // - At 0.5, `predict(x) == (probability(x) >= 0.5)`; 0 behaves as 0.5.
    // - Raising the threshold to 0.9 never adds positives.
    fn threshold_controls_predictions_monotonically() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(19);
        let base = LogisticRegression::new(overlapping_classes())
            .expect("valid model")
            .with_initial_theta(array![0.3, 1.2])
            .expect("valid theta");
        let unset = base.clone().with_threshold(0.0).expect("0 is the unset sentinel");
        let strict = base.clone().with_threshold(0.9).expect("valid threshold");
        let inputs: Vec<Array1<f64>> =
            (0..200).map(|_| array![1.0, rng.random_range(-3.0..3.0)]).collect();

        // Act
        let mut positives_default = 0;
        let mut positives_strict = 0;
        for x in &inputs {
            let p = base.probability(x.view()).expect("probability");
            let at_default = base.predict(x.view()).expect("prediction");
            let at_strict = strict.predict(x.view()).expect("prediction");

            // Assert
            assert_eq!(at_default, p >= 0.5);
            assert_eq!(unset.predict(x.view()).expect("prediction"), at_default);
            assert!(!at_strict || at_default);
            positives_default += usize::from(at_default);
            positives_strict += usize::from(at_strict);
        }
        assert!(positives_strict <= positives_default);
        assert_eq!(unset.threshold(), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure out-of-range thresholds are rejected.
    //
    // Given
    // -----
    // - Thresholds 1.2 and NaN.
    //
    // Expect
    // ------
    // - `InvalidThreshold` for both.
    fn with_threshold_rejects_out_of_range_values() {
        let model = LogisticRegression::new(overlapping_classes()).expect("valid model");

        let too_high = model.clone().with_threshold(1.2);
        let nan = model.with_threshold(f64::NAN);

        assert!(matches!(too_high, Err(RegressionError::InvalidThreshold { .. })));
        assert!(matches!(nan, Err(RegressionError::InvalidThreshold { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Train on overlapping classes with every solver/line-search pairing.
    //
    // Given
    // -----
    // - The overlapping dataset from θ₀ = 0.
    // - BFGS and L-BFGS (m = 7), each with More–Thuente and Hager–Zhang.
    //
    // Expect
    // ------
    // - Converged runs whose θ̂ has a gradient norm below 1e-5, a cost
    //   below ln 2, and a positive slope; all pairings agree within 1e-4.
    fn minimize_finds_stationary_point_on_overlapping_classes() {
        // Arrange
        let settings = ConvergenceSettings::new(1_000, 1e-9, 1e-14, 100).expect("valid settings");
        let methods = [QuasiNewton::Bfgs, QuasiNewton::Lbfgs { mem: 7 }];
        let searches = [LineSearcher::MoreThuente, LineSearcher::HagerZhang];
        let mut fits = Vec::new();

        for method in methods {
            for line_searcher in searches {
                let options = SolverOptions::new(method, line_searcher, false).expect("options");
                let mut model = LogisticRegression::new(overlapping_classes())
                    .expect("valid model")
                    .with_solver(options);

                // Act
                let out = model
                    .minimize(Some(&settings))
                    .unwrap_or_else(|e| panic!("{method:?}/{line_searcher:?} failed: {e}"));

                // Assert
                let mut grad = Grad::zeros(2);
                model.gradient(model.theta(), &mut grad).expect("gradient");
                assert!(out.converged, "{method:?}/{line_searcher:?}: {}", out.status);
                assert!(
                    grad.iter().all(|g| g.abs() < 1e-5),
                    "{method:?}/{line_searcher:?} gradient at θ̂: {grad}"
                );
                assert!(out.cost < std::f64::consts::LN_2);
                assert!(out.theta_hat[1] > 0.0);
                fits.push(out.theta_hat);
            }
        }
        for fit in &fits[1..] {
            assert!((fit - &fits[0]).iter().all(|d| d.abs() < 1e-4), "{fit} vs {}", fits[0]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that the loss handed to the optimizer equals `cost` wherever
    // `cost` is defined, and stays finite where `cost` reports `LogDomain`.
    //
    // Given
    // -----
    // - 30 random examples with 3 features and 10 random θ in [-2, 2]³.
    // - The overlapping dataset at the saturating θ = [100, 0].
    //
    // Expect
    // ------
    // - Agreement within 1e-12 on the random points.
    // - At saturation, `cost` is `LogDomain` while `value` is the finite
    //   `(1/m) Σ 100·(1 − y_i) = 50`.
    fn training_loss_matches_cost_and_survives_saturation() {
        let mut rng = StdRng::seed_from_u64(41);
        let model = LogisticRegression::new(random_dataset(&mut rng, 30, 3)).expect("valid model");
        for _ in 0..10 {
            let theta = Array1::from_shape_fn(3, |_| rng.random_range(-2.0..2.0));

            let direct = model.cost(&theta).expect("cost");
            let stable = model.value(&theta).expect("value");

            assert!((direct - stable).abs() < 1e-12, "{direct} vs {stable}");
        }

        let overlapping = LogisticRegression::new(overlapping_classes()).expect("valid model");
        let saturated = array![100.0, 0.0];

        assert!(matches!(overlapping.cost(&saturated), Err(RegressionError::LogDomain { .. })));
        let value = overlapping.value(&saturated).expect("finite training loss");
        assert!((value - 50.0).abs() < 1e-12, "value = {value}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure unscaled features train with the default solver, where early
    // line-search steps saturate the sigmoid.
    //
    // Given
    // -----
    // - 13 mixed labels on x = 5, 12, ..., 89 as rows `[1, x]`.
    // - The same labels on x / 10.
    // - Default BFGS + More–Thuente from θ₀ = 0 for both.
    //
    // Expect
    // ------
    // - Both runs converge.
    // - Equal intercepts and slopes related by the factor 10, within 1e-3.
    fn minimize_trains_on_unscaled_features() {
        // Arrange
        let ys = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        let xs: Vec<f64> = (0..13).map(|k| 5.0 + 7.0 * k as f64).collect();
        let build = |scale: f64| {
            let rows = xs.iter().map(|&x| vec![1.0, x / scale]).collect();
            let data = Dataset::from_rows(rows, ys.to_vec()).expect("valid dataset");
            LogisticRegression::new(data).expect("valid model")
        };
        let mut unscaled = build(1.0);
        let mut scaled = build(10.0);

        // Act
        let raw = unscaled.minimize(None).expect("unscaled features should train");
        let reference = scaled.minimize(None).expect("scaled features should train");

        // Assert
        assert!(raw.converged && reference.converged);
        assert!(
            (raw.theta_hat[0] - reference.theta_hat[0]).abs() < 1e-3,
            "intercepts {} vs {}",
            raw.theta_hat[0],
            reference.theta_hat[0]
        );
        assert!(
            (10.0 * raw.theta_hat[1] - reference.theta_hat[1]).abs() < 1e-3,
            "slopes {} vs {}",
            raw.theta_hat[1],
            reference.theta_hat[1]
        );
    }

    #[test]
    // Purpose
    // -------
    // Confirm that training from a saturating initial guess proceeds on
    // the finite training loss and reaches the same optimum as from 0.
    //
    // Given
    // -----
    // - θ₀ = [40, 0], where every predicted probability rounds to 1.
    // - A second model started from θ₀ = 0.
    //
    // Expect
    // ------
    // - Both runs converge to the same θ̂ within 1e-4.
    fn minimize_recovers_from_saturated_start() {
        let settings = ConvergenceSettings::new(1_000, 1e-9, 1e-14, 100).expect("valid settings");
        let mut saturated = LogisticRegression::new(overlapping_classes())
            .expect("valid model")
            .with_initial_theta(array![40.0, 0.0])
            .expect("valid theta");
        let mut origin = LogisticRegression::new(overlapping_classes()).expect("valid model");

        let from_saturated = saturated.minimize(Some(&settings)).expect("training should converge");
        let from_origin = origin.minimize(Some(&settings)).expect("training should converge");

        assert!(from_saturated.converged);
        assert!(
            (&from_saturated.theta_hat - &from_origin.theta_hat).iter().all(|d| d.abs() < 1e-4),
            "{} vs {}",
            from_saturated.theta_hat,
            from_origin.theta_hat
        );
        assert!(saturated.is_trained());
    }
}
