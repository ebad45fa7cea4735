//! Two-component principal-component projection for scatter diagnostics.
//!
//! The projection only serves visual inspection of the clustering; nothing
//! in the optimizer or evaluator reads it. Each axis is flipped so that its
//! largest-magnitude loading is positive, which makes repeated runs on the
//! same input agree. Callers should still treat the orientation of an axis
//! as arbitrary and rely only on the relative layout of the points.

use crate::error::{Error, Result};
use crate::utils::validate_data;
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array2, ArrayView2, Axis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Points projected onto the first two principal axes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Projection {
    /// `n_points x 2` coordinates
    pub points: Array2<f64>,
    /// `2 x n_features` unit loadings of the two axes
    pub components: Array2<f64>,
    /// Share of total variance carried by each axis
    pub explained_variance_ratio: [f64; 2],
}

impl Projection {
    /// Coordinates as `(x, y)` pairs in row order
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.rows().into_iter().map(|r| (r[0], r[1])).collect()
    }
}

/// Project a standardized matrix onto its first two principal components
pub fn project2d(data: ArrayView2<f64>) -> Result<Projection> {
    validate_data(data)?;
    let (n_points, n_features) = data.dim();
    if n_points < 2 {
        return Err(Error::invalid_data("Projection needs at least two rows"));
    }
    if n_features < 2 {
        return Err(Error::invalid_data("Projection needs at least two features"));
    }

    let mean = data.sum_axis(Axis(0)) / n_points as f64;
    let centered = &data - &mean;
    let covariance = centered.t().dot(&centered) / (n_points - 1) as f64;

    let eigen = SymmetricEigen::new(DMatrix::from_fn(n_features, n_features, |i, j| {
        covariance[[i, j]]
    }));

    let mut order: Vec<usize> = (0..n_features).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_variance: f64 = eigen.eigenvalues.iter().map(|v| v.max(0.0)).sum();
    let mut components = Array2::zeros((2, n_features));
    let mut explained_variance_ratio = [0.0; 2];

    for (axis, &idx) in order.iter().take(2).enumerate() {
        let loading = eigen.eigenvectors.column(idx);
        let pivot = (0..n_features)
            .fold(0, |best, j| if loading[j].abs() > loading[best].abs() { j } else { best });
        let sign = if loading[pivot] < 0.0 { -1.0 } else { 1.0 };

        for j in 0..n_features {
            components[[axis, j]] = sign * loading[j];
        }
        if total_variance > 0.0 {
            explained_variance_ratio[axis] = eigen.eigenvalues[idx].max(0.0) / total_variance;
        }
    }

    let points = centered.dot(&components.t());
    log::debug!(
        "Projected {} regions, explained variance {:.3} / {:.3}",
        n_points,
        explained_variance_ratio[0],
        explained_variance_ratio[1]
    );

    Ok(Projection {
        points,
        components,
        explained_variance_ratio,
    })
}
