//! Distance metrics over standardized feature vectors

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Trait for computing distances between numeric feature vectors
pub trait Distance {
    /// Compute distance between two feature vectors
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64>;

    /// Compute distances between a single point and every centroid row
    fn distances_to_centroids(&self, point: ArrayView1<f64>, centroids: ArrayView2<f64>) -> Result<Vec<f64>> {
        if centroids.ncols() != point.len() {
            return Err(Error::invalid_data("Point and centroids must have same number of features"));
        }

        let mut distances = Vec::with_capacity(centroids.nrows());
        for centroid_row in centroids.rows() {
            distances.push(self.distance(point, centroid_row)?);
        }
        Ok(distances)
    }
}

/// Euclidean distance
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl Distance for EuclideanDistance {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
        Ok(squared_euclidean(a, b)?.sqrt())
    }
}

/// Squared Euclidean distance, the quantity the c-means objective sums
pub fn squared_euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::invalid_data("Vectors must have the same length"));
    }

    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum())
}

/// Full `n x n` Euclidean distance matrix between the rows of `data`.
///
/// Rows are computed in parallel and collected in row order, so the result
/// does not depend on scheduling.
pub fn pairwise_distances(data: ArrayView2<f64>) -> Array2<f64> {
    let n = data.nrows();
    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let a = data.row(i);
            (0..n)
                .map(|j| {
                    a.iter()
                        .zip(data.row(j).iter())
                        .map(|(x, y)| (x - y).powi(2))
                        .sum::<f64>()
                        .sqrt()
                })
                .collect()
        })
        .collect();

    let mut out = Array2::zeros((n, n));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, d) in row.into_iter().enumerate() {
            out[[i, j]] = d;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_euclidean_distance() {
        let distance = EuclideanDistance;
        let a = arr1(&[1.0, 2.0, 3.0]);
        let b = arr1(&[4.0, 5.0, 6.0]);

        let result = distance.distance(a.view(), b.view()).unwrap();
        let expected = ((3.0_f64).powi(2) * 3.0).sqrt();
        assert!((result - expected).abs() < 1e-10);
    }

    #[test]
    fn test_length_mismatch() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0]);
        assert!(squared_euclidean(a.view(), b.view()).is_err());
    }

    #[test]
    fn test_distances_to_centroids() {
        let point = arr1(&[0.0, 0.0]);
        let centroids = arr2(&[[3.0, 4.0], [0.0, 1.0]]);
        let d = EuclideanDistance
            .distances_to_centroids(point.view(), centroids.view())
            .unwrap();
        assert_eq!(d, vec![5.0, 1.0]);
    }

    #[test]
    fn test_pairwise_symmetric_zero_diagonal() {
        let data = arr2(&[[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]]);
        let d = pairwise_distances(data.view());
        assert_eq!(d.dim(), (3, 3));
        for i in 0..3 {
            assert_eq!(d[[i, i]], 0.0);
            for j in 0..3 {
                assert_eq!(d[[i, j]], d[[j, i]]);
            }
        }
        assert!((d[[0, 2]] - 10.0).abs() < 1e-12);
    }
}
