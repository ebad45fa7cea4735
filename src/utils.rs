//! Validation and bookkeeping helpers shared by the optimizer and evaluator

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2};

/// Largest cluster count the engine accepts
pub const MAX_CLUSTERS: usize = 10;

/// Validate a cluster request against the number of regions.
///
/// `n_clusters` must lie in `[2, min(MAX_CLUSTERS, n_points - 1)]`.
pub fn validate_cluster_count(n_clusters: usize, n_points: usize) -> Result<()> {
    if n_clusters < 2 {
        return Err(Error::invalid_cluster_request(format!(
            "n_clusters must be >= 2, got {}",
            n_clusters
        )));
    }

    let upper = MAX_CLUSTERS.min(n_points.saturating_sub(1));
    if n_clusters > upper {
        return Err(Error::invalid_cluster_request(format!(
            "n_clusters = {} exceeds the allowed maximum {} for {} regions",
            n_clusters, upper, n_points
        )));
    }

    Ok(())
}

/// Validate optimizer parameters
pub fn validate_parameters(fuzziness: f64, max_iter: usize, tol: f64, n_init: usize) -> Result<()> {
    if !(fuzziness.is_finite() && fuzziness > 1.0) {
        return Err(Error::invalid_cluster_request("fuzziness must be a finite value > 1"));
    }

    if max_iter == 0 {
        return Err(Error::invalid_cluster_request("max_iter must be > 0"));
    }

    if !(tol >= 0.0) {
        return Err(Error::invalid_cluster_request("tol must be >= 0"));
    }

    if n_init == 0 {
        return Err(Error::invalid_cluster_request("n_init must be > 0"));
    }

    Ok(())
}

/// Validate a feature matrix: non-empty and free of NaN/Inf
pub fn validate_data(data: ArrayView2<f64>) -> Result<()> {
    if data.nrows() == 0 {
        return Err(Error::invalid_data("Data cannot be empty"));
    }

    if data.ncols() == 0 {
        return Err(Error::invalid_data("Data must have at least one feature"));
    }

    let non_finite = data.iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        return Err(Error::non_finite_input(format!(
            "{} non-finite values in feature matrix",
            non_finite
        )));
    }

    Ok(())
}

/// Get indices of points assigned to each cluster
pub fn get_cluster_indices(labels: ArrayView1<usize>, n_clusters: usize) -> Vec<Vec<usize>> {
    let mut cluster_indices = vec![Vec::new(); n_clusters];

    for (point_idx, &cluster_id) in labels.iter().enumerate() {
        if cluster_id < n_clusters {
            cluster_indices[cluster_id].push(point_idx);
        }
    }

    cluster_indices
}

/// Number of regions per cluster, indexed by cluster
pub fn cluster_sizes(labels: ArrayView1<usize>, n_clusters: usize) -> Vec<usize> {
    let mut sizes = vec![0; n_clusters];

    for &cluster_id in labels.iter() {
        if cluster_id < n_clusters {
            sizes[cluster_id] += 1;
        }
    }

    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_validate_cluster_count() {
        assert!(validate_cluster_count(2, 3).is_ok());
        assert!(validate_cluster_count(4, 5).is_ok());
        assert!(validate_cluster_count(10, 40).is_ok());

        assert!(validate_cluster_count(1, 5).is_err());
        assert!(validate_cluster_count(5, 5).is_err());
        assert!(validate_cluster_count(11, 40).is_err());
        assert!(validate_cluster_count(2, 2).is_err());
    }

    #[test]
    fn test_validate_parameters() {
        assert!(validate_parameters(2.0, 1000, 0.005, 1).is_ok());
        assert!(validate_parameters(1.0, 1000, 0.005, 1).is_err());
        assert!(validate_parameters(f64::NAN, 1000, 0.005, 1).is_err());
        assert!(validate_parameters(2.0, 0, 0.005, 1).is_err());
        assert!(validate_parameters(2.0, 1000, -0.1, 1).is_err());
        assert!(validate_parameters(2.0, 1000, 0.005, 0).is_err());
    }

    #[test]
    fn test_validate_data() {
        let good = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        assert!(validate_data(good.view()).is_ok());

        let bad = arr2(&[[1.0, f64::NAN], [f64::INFINITY, 4.0]]);
        assert!(matches!(validate_data(bad.view()), Err(Error::NonFiniteInput { .. })));
    }

    #[test]
    fn test_get_cluster_indices() {
        let labels = arr1(&[0, 1, 0, 1, 2]);
        let indices = get_cluster_indices(labels.view(), 3);

        assert_eq!(indices[0], vec![0, 2]);
        assert_eq!(indices[1], vec![1, 3]);
        assert_eq!(indices[2], vec![4]);
    }

    #[test]
    fn test_cluster_sizes() {
        let labels = arr1(&[0, 1, 0, 1, 2]);
        assert_eq!(cluster_sizes(labels.view(), 4), vec![2, 2, 1, 0]);
    }
}
