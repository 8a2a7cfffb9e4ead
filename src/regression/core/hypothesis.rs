//! Hypothesis functions `h(x, θ)` mapping a feature vector and parameters
//! to a raw score.
//!
//! The analytic gradients in `models` assume `∂h/∂θ_j = x_j`, which holds
//! for [`DotProduct`]. Any other hypothesis still evaluates and predicts
//! correctly, but its trained θ is only as good as that assumption.
use ndarray::ArrayView1;

/// Score function used by the regression models.
pub trait Hypothesis {
    /// Evaluate `h(x, θ)`. Both views have the same length.
    fn evaluate(&self, features: ArrayView1<'_, f64>, theta: ArrayView1<'_, f64>) -> f64;
}

/// `h(x, θ) = Σ_j θ_j x_j`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DotProduct;

impl Hypothesis for DotProduct {
    fn evaluate(&self, features: ArrayView1<'_, f64>, theta: ArrayView1<'_, f64>) -> f64 {
        features.dot(&theta)
    }
}

/// Adapter turning any closure into a [`Hypothesis`].
#[derive(Clone, Copy)]
pub struct FnHypothesis<F>(pub F);

impl<F> Hypothesis for FnHypothesis<F>
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64,
{
    fn evaluate(&self, features: ArrayView1<'_, f64>, theta: ArrayView1<'_, f64>) -> f64 {
        (self.0)(features, theta)
    }
}

impl<F> std::fmt::Debug for FnHypothesis<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnHypothesis(..)")
    }
}
