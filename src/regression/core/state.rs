//! Shared model state for the regression trainers.
//!
//! Purpose
//! -------
//! Hold everything the linear and logistic trainers have in common: the
//! training data, the current parameter vector, the learning rate, and the
//! hypothesis. Both trainers own a [`ModelState`] and add only their loss,
//! gradient, and prediction rule on top.
//!
//! Invariants & assumptions
//! ------------------------
//! - `theta.len() == data.n_features()` and every entry is finite.
//! - `learning_rate` is finite and > 0.
//! - `theta` changes only through [`ModelState::set_theta`] (validated) or
//!   after a successful optimizer run.
use crate::{
    optimization::loss_optimizer::Theta,
    regression::{
        core::{
            data::Dataset,
            hypothesis::{DotProduct, Hypothesis},
            validation::{validate_features, validate_learning_rate, validate_theta},
        },
        errors::RegressionResult,
    },
};
use ndarray::ArrayView1;

pub const DEFAULT_LEARNING_RATE: f64 = 1.0;

/// Data, parameters, and configuration shared by both trainers.
#[derive(Debug, Clone)]
pub struct ModelState<H = DotProduct> {
    data: Dataset,
    theta: Theta,
    learning_rate: f64,
    hypothesis: H,
}

impl ModelState<DotProduct> {
    /// Default state: θ = 0, learning rate 1, dot-product hypothesis.
    pub fn new(data: Dataset) -> Self {
        let theta = Theta::zeros(data.n_features());
        ModelState { data, theta, learning_rate: DEFAULT_LEARNING_RATE, hypothesis: DotProduct }
    }
}

impl<H: Hypothesis> ModelState<H> {
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn theta(&self) -> &Theta {
        &self.theta
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn hypothesis(&self) -> &H {
        &self.hypothesis
    }

    /// Replace θ after checking its length and finiteness.
    pub fn set_theta(&mut self, theta: Theta) -> RegressionResult<()> {
        validate_theta(theta.view(), self.data.n_features())?;
        self.theta = theta;
        Ok(())
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> RegressionResult<()> {
        validate_learning_rate(learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    /// Swap the hypothesis, keeping data, θ, and learning rate.
    pub fn with_hypothesis<H2: Hypothesis>(self, hypothesis: H2) -> ModelState<H2> {
        ModelState {
            data: self.data,
            theta: self.theta,
            learning_rate: self.learning_rate,
            hypothesis,
        }
    }

    pub fn check_theta(&self, theta: &Theta) -> RegressionResult<()> {
        validate_theta(theta.view(), self.data.n_features())
    }

    pub fn check_features(&self, features: ArrayView1<'_, f64>) -> RegressionResult<()> {
        validate_features(features, self.data.n_features())
    }

    /// Raw score `h(x, θ)`.
    pub fn score(&self, features: ArrayView1<'_, f64>, theta: ArrayView1<'_, f64>) -> f64 {
        self.hypothesis.evaluate(features, theta)
    }

    /// Iterate `(x_i, y_i, h(x_i, θ))` over the training set.
    pub fn scored_examples<'s>(
        &'s self, theta: &'s Theta,
    ) -> impl Iterator<Item = (ArrayView1<'s, f64>, f64, f64)> + 's {
        let targets = self.data.targets();
        self.data
            .features()
            .outer_iter()
            .zip(targets.iter())
            .map(move |(x, &y)| {
                let h = self.hypothesis.evaluate(x, theta.view());
                (x, y, h)
            })
    }
}
