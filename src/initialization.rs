//! Initial membership matrices for fuzzy c-means

use crate::error::{Error, Result};
use ndarray::Array2;
use rand::prelude::*;

/// Draw a random `n_clusters x n_points` membership matrix.
///
/// Every entry is drawn uniformly from `[0, 1)` in row-major order, then each
/// column is divided by its sum so the memberships of a point add up to one.
/// The same RNG state always yields the same matrix for a given shape.
pub fn random_membership<R: Rng>(n_clusters: usize, n_points: usize, rng: &mut R) -> Result<Array2<f64>> {
    if n_clusters == 0 {
        return Err(Error::invalid_cluster_request("Number of clusters must be > 0"));
    }
    if n_points == 0 {
        return Err(Error::invalid_data("Data cannot be empty"));
    }

    let mut u = Array2::from_shape_simple_fn((n_clusters, n_points), || rng.gen::<f64>());
    normalize_columns(&mut u);
    Ok(u)
}

/// Scale each column to sum to one. An all-zero column becomes uniform.
pub(crate) fn normalize_columns(u: &mut Array2<f64>) {
    let k = u.nrows() as f64;
    for mut column in u.columns_mut() {
        let total: f64 = column.sum();
        if total > 0.0 {
            column.mapv_inplace(|v| v / total);
        } else {
            column.fill(1.0 / k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let u = random_membership(3, 7, &mut rng).unwrap();

        assert_eq!(u.dim(), (3, 7));
        for column in u.columns() {
            assert!((column.sum() - 1.0).abs() < 1e-12);
            assert!(column.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = random_membership(4, 10, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = random_membership(4, 10, &mut StdRng::seed_from_u64(7)).unwrap();
        let c = random_membership(4, 10, &mut StdRng::seed_from_u64(8)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_column_becomes_uniform() {
        let mut u = Array2::zeros((4, 2));
        u[[1, 1]] = 2.0;
        normalize_columns(&mut u);

        assert!(u.column(0).iter().all(|&v| v == 0.25));
        assert_eq!(u[[1, 1]], 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(random_membership(0, 5, &mut rng).is_err());
        assert!(random_membership(2, 0, &mut rng).is_err());
    }
}
