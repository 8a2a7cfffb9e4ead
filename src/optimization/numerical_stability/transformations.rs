//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used by the
//! regression losses that are prone to overflow/underflow in naïve form.
//!
//! # Provided items
//! - [`safe_logistic(x)`]: sigmoid `1 / (1 + exp(-x))` evaluated without
//!   overflowing `exp` for large negative `x`.
//! - [`safe_softplus(x)`]: `ln(1 + exp(x))`, finite for every finite `x`.
//!
//! # Rationale
//! The naïve sigmoid computes `exp(-x)`, which overflows to `+∞` once
//! `x < -709`. The result is still `0.0` in IEEE arithmetic, but the branch
//! below keeps every intermediate finite and preserves precision in the
//! lower tail, where `exp(x) / (1 + exp(x))` is accurate.

/// Numerically stable logistic sigmoid: `σ(x) = 1 / (1 + exp(-x))`.
///
/// - For `x >= 0`, evaluates `1 / (1 + exp(-x))` (`exp(-x) ≤ 1`).
/// - For `x < 0`, evaluates `exp(x) / (1 + exp(x))` (`exp(x) < 1`).
///
/// Both branches are algebraically identical to the textbook form.
///
/// # Parameters
/// - `x`: real input (the raw hypothesis score).
///
/// # Returns
/// - `σ(x)` in `[0, 1]`. The endpoints are reached only through rounding:
///   `σ(x) == 1.0` for `x ≳ 36.7` and `σ(x) == 0.0` for `x ≲ -745`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 0`, evaluates `x + ln1p(exp(-x))`.
/// - Otherwise, evaluates `ln1p(exp(x))`.
///
/// `exp` only ever sees a non-positive argument, so the result is finite
/// for every finite `x` and never loses the `ln1p` tail precision. Used for
/// cross-entropy in the form `softplus(z) − y·z`, which stays finite where
/// `ln σ(z)` would hit `ln 0`.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `softplus(x)` as `f64`, strictly positive unless `exp(x)` underflows.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 0.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of `safe_logistic` with the naïve formula on a safe grid.
    // - Symmetry σ(-x) = 1 - σ(x) and finite tails.
    // - `safe_softplus` against the naïve form and the identity
    //   softplus(x) − softplus(−x) = x.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the stable sigmoid matches `1 / (1 + exp(-x))` where the
    // naïve form is well conditioned.
    //
    // Given
    // -----
    // - A grid of inputs in [-20, 20].
    //
    // Expect
    // ------
    // - Absolute difference below 1e-15 at every grid point.
    fn safe_logistic_matches_naive_formula_on_safe_grid() {
        for k in -40..=40 {
            // Arrange
            let x = 0.5 * k as f64;
            let naive = 1.0 / (1.0 + (-x).exp());

            // Act
            let stable = safe_logistic(x);

            // Assert
            assert!((stable - naive).abs() < 1e-15, "mismatch at x = {x}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the symmetry identity and the behavior in the far tails.
    //
    // Given
    // -----
    // - Inputs ±3 and ±1000.
    //
    // Expect
    // ------
    // - σ(-3) = 1 - σ(3) within 1e-15.
    // - σ(1000) = 1, σ(-1000) = 0, both finite.
    fn safe_logistic_is_symmetric_with_finite_tails() {
        assert!((safe_logistic(-3.0) - (1.0 - safe_logistic(3.0))).abs() < 1e-15);
        assert_eq!(safe_logistic(0.0), 0.5);
        assert_eq!(safe_logistic(1000.0), 1.0);
        assert_eq!(safe_logistic(-1000.0), 0.0);
        assert!(safe_logistic(-1000.0).is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Verify that the stable softplus matches `ln(1 + exp(x))` where the
    // naïve form is safe, and stays finite where it overflows.
    //
    // Given
    // -----
    // - A grid of inputs in [-20, 20], plus ±800.
    //
    // Expect
    // ------
    // - Relative difference below 1e-14 on the grid.
    // - softplus(x) − softplus(−x) = x on the grid.
    // - softplus(800) = 800 and softplus(−800) = 0, both finite.
    fn safe_softplus_matches_naive_formula_and_stays_finite() {
        for k in -40..=40 {
            let x = 0.5 * k as f64;
            let naive = (1.0 + x.exp()).ln();

            let stable = safe_softplus(x);

            assert!((stable - naive).abs() <= 1e-14 * naive.max(1.0), "mismatch at x = {x}");
            assert!((stable - safe_softplus(-x) - x).abs() < 1e-12, "identity at x = {x}");
        }
        assert!((1.0 + 800.0_f64.exp()).ln().is_infinite());
        assert_eq!(safe_softplus(800.0), 800.0);
        assert_eq!(safe_softplus(-800.0), 0.0);
    }
}
