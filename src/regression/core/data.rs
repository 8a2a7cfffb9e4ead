//! Training data container for regression models.
//!
//! Purpose
//! -------
//! Provide a single validated container pairing a feature matrix with its
//! target vector. All basic input checks happen once, at construction, so
//! loss and gradient evaluators can iterate over the data without
//! re-validating it.
//!
//! Key behaviors
//! -------------
//! - [`Dataset::new`] validates an `Array2` feature matrix against an
//!   `Array1` target vector.
//! - [`Dataset::from_rows`] builds the matrix from row vectors and reports
//!   the first row whose length differs from the first row's.
//!
//! Invariants & assumptions
//! ------------------------
//! - `m = n_samples() > 0` and `n = n_features() > 0`.
//! - `targets.len() == m`.
//! - Every feature and target is finite.
//! - The container is read-only after construction; there are no mutable
//!   accessors.
//!
//! Conventions
//! -----------
//! - Rows are examples, columns are features. Indexing is 0-based.
//! - An intercept is not added implicitly; callers include a constant
//!   column when they want one.
use crate::regression::errors::{RegressionError, RegressionResult};
use ndarray::{Array1, Array2};

/// `Dataset` — validated feature matrix plus target vector.
///
/// Fields
/// ------
/// - `features`: `Array2<f64>` with shape `(m, n)`.
/// - `targets`: `Array1<f64>` with length `m`.
///
/// Performance
/// -----------
/// - Validation is a single O(m·n) scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl Dataset {
    /// Construct a validated [`Dataset`].
    ///
    /// Errors
    /// ------
    /// - `RegressionError::EmptyDataset` when there are no rows.
    /// - `RegressionError::NoFeatures` when there are no columns.
    /// - `RegressionError::TargetLengthMismatch` when `targets.len() != m`.
    /// - `RegressionError::NonFiniteFeature` / `NonFiniteTarget` for the
    ///   first NaN or ±∞ encountered.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_regression::regression::core::data::Dataset;
    /// let data = Dataset::new(array![[1.0], [2.0]], array![2.0, 4.0]).unwrap();
    /// assert_eq!(data.n_samples(), 2);
    /// assert_eq!(data.n_features(), 1);
    /// ```
    pub fn new(features: Array2<f64>, targets: Array1<f64>) -> RegressionResult<Self> {
        let (m, n) = features.dim();
        if m == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        if n == 0 {
            return Err(RegressionError::NoFeatures);
        }
        if targets.len() != m {
            return Err(RegressionError::TargetLengthMismatch { expected: m, found: targets.len() });
        }

        for ((row, col), &value) in features.indexed_iter() {
            if !value.is_finite() {
                return Err(RegressionError::NonFiniteFeature { row, col, value });
            }
        }
        for (index, &value) in targets.iter().enumerate() {
            if !value.is_finite() {
                return Err(RegressionError::NonFiniteTarget { index, value });
            }
        }

        Ok(Dataset { features, targets })
    }

    /// Construct a [`Dataset`] from row vectors.
    ///
    /// Errors
    /// ------
    /// - `RegressionError::RaggedFeatures` for the first row whose length
    ///   differs from row 0.
    /// - Everything [`Dataset::new`] reports.
    pub fn from_rows(rows: Vec<Vec<f64>>, targets: Vec<f64>) -> RegressionResult<Self> {
        let m = rows.len();
        if m == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        let n = rows[0].len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, values)| values.len() != n) {
            return Err(RegressionError::RaggedFeatures { row, expected: n, found: values.len() });
        }
        let features = Array2::from_shape_fn((m, n), |(i, j)| rows[i][j]);
        Dataset::new(features, Array1::from(targets))
    }

    /// Number of examples `m`.
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns `n`.
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }
}
