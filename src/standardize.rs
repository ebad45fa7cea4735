//! Per-column z-score standardization

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance, in units of `f64::EPSILON`, below which a column's
/// standard deviation counts as zero
const CONSTANT_STD_ULPS: f64 = 10.0;

/// Whether a column with this mean and std is treated as constant.
///
/// Rounding in `sum / n` leaves a tiny nonzero std for columns like
/// `[0.1, 0.1, 0.1]`, so the test is relative to the column's magnitude.
fn is_constant(std: f64, mean: f64) -> bool {
    std <= CONSTANT_STD_ULPS * f64::EPSILON * mean.abs().max(1.0)
}

/// Column means and population standard deviations fitted on a table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Standardizer {
    /// Per-column mean
    pub mean: Array1<f64>,
    /// Per-column population standard deviation
    pub std: Array1<f64>,
}

impl Standardizer {
    /// Fit column statistics. Requires at least two rows and one column.
    pub fn fit(data: ArrayView2<f64>) -> Result<Self> {
        let (n_rows, n_cols) = data.dim();
        if n_rows < 2 {
            return Err(Error::invalid_data("Standardization needs at least two rows"));
        }
        if n_cols == 0 {
            return Err(Error::invalid_data("Data must have at least one feature"));
        }

        let n = n_rows as f64;
        let mean = data.sum_axis(Axis(0)) / n;
        let mut std = Array1::zeros(n_cols);
        for (j, column) in data.columns().into_iter().enumerate() {
            let first = column[0];
            if column.iter().all(|&x| x == first) {
                continue;
            }
            let var = column.iter().map(|x| (x - mean[j]).powi(2)).sum::<f64>() / n;
            let s = var.sqrt();
            if !is_constant(s, mean[j]) {
                std[j] = s;
            }
        }

        Ok(Self { mean, std })
    }

    /// Apply the fitted statistics. Zero-variance columns map to 0.0.
    pub fn transform(&self, data: ArrayView2<f64>) -> Result<Array2<f64>> {
        if data.ncols() != self.mean.len() {
            return Err(Error::invalid_data(format!(
                "Expected {} features, got {}",
                self.mean.len(),
                data.ncols()
            )));
        }

        let mut out = data.to_owned();
        for (j, mut column) in out.columns_mut().into_iter().enumerate() {
            let (mean, std) = (self.mean[j], self.std[j]);
            if is_constant(std, mean) {
                column.fill(0.0);
            } else {
                column.mapv_inplace(|x| (x - mean) / std);
            }
        }
        Ok(out)
    }

    /// Indices of columns with zero variance
    pub fn constant_columns(&self) -> Vec<usize> {
        self.std
            .iter()
            .zip(self.mean.iter())
            .enumerate()
            .filter(|(_, (s, m))| is_constant(**s, **m))
            .map(|(j, _)| j)
            .collect()
    }
}

/// Standardize every column to mean 0 and unit population variance
pub fn standardize(data: ArrayView2<f64>) -> Result<Array2<f64>> {
    let scaler = Standardizer::fit(data)?;
    let constant = scaler.constant_columns();
    if !constant.is_empty() {
        log::debug!("Constant columns {:?} standardized to zero", constant);
    }
    scaler.transform(data)
}
