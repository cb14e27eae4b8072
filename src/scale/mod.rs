//! Column standardization.

use ndarray::{Array1, Array2, Axis};

use crate::error::{CohortPrepError, Result};

/// Zero-mean, unit-variance column standardizer.
///
/// Statistics are fitted over the full matrix the pipeline hands in; the
/// fitted scaler is not reused outside the invocation.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Fit per-column statistics (mean and population standard deviation).
    ///
    /// Zero-variance columns keep a scale of 1.0 so constant features
    /// standardize to zero instead of dividing by zero.
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        let mean = match x.mean_axis(Axis(0)) {
            Some(mean) => mean,
            None => return Err(CohortPrepError::EmptyDataset),
        };
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        Ok(Self { mean, scale })
    }

    /// Standardize a matrix with the fitted statistics
    #[must_use]
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        (x - &self.mean) / &self.scale
    }

    /// Fit on `x` and standardize it in one step
    pub fn fit_transform(x: &Array2<f64>) -> Result<Array2<f64>> {
        let scaler = Self::fit(x)?;
        Ok(scaler.transform(x))
    }

    /// Fitted per-column means
    #[must_use]
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Fitted per-column scales
    #[must_use]
    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_columns_standardize_to_zero_mean_unit_variance() {
        let x = arr2(&[
            [1.0, 10.0, -3.0],
            [2.0, 20.0, 0.0],
            [3.0, 30.0, 3.0],
            [4.0, 40.0, 6.0],
        ]);
        let scaled = StandardScaler::fit_transform(&x).unwrap();

        for column in scaled.axis_iter(Axis(1)) {
            let n = column.len() as f64;
            let mean = column.sum() / n;
            let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            assert!(mean.abs() < 1e-12);
            assert!((variance - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let x = arr2(&[[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]]);
        let scaled = StandardScaler::fit_transform(&x).unwrap();

        assert!(scaled.column(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_uses_fitted_statistics() {
        let x = arr2(&[[0.0], [10.0]]);
        let scaler = StandardScaler::fit(&x).unwrap();

        // mean 5, population std 5
        let out = scaler.transform(&arr2(&[[5.0], [15.0]]));
        assert!((out[[0, 0]]).abs() < 1e-12);
        assert!((out[[1, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let x = Array2::<f64>::zeros((0, 5));
        assert!(matches!(
            StandardScaler::fit(&x),
            Err(CohortPrepError::EmptyDataset)
        ));
    }
}
