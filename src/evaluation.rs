//! Internal cluster-quality metrics.
//!
//! All three scores are computed from the standardized features and a hard
//! partition in which every cluster has at least one member:
//!
//! - cohesion-separation (silhouette), in `[-1, 1]`, higher is better
//! - distance-spread ratio (Davies-Bouldin), `>= 0`, lower is better
//! - variance ratio (Calinski-Harabasz), higher is better
//!
//! A metric that is undefined for the partition is an error, never a
//! placeholder value.

use crate::distance::{pairwise_distances, Distance, EuclideanDistance};
use crate::error::{Error, Result};
use crate::labels::HardLabels;
use crate::utils::{get_cluster_indices, validate_data};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scores of one clustering run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationReport {
    /// Mean silhouette coefficient
    pub cohesion_separation: f64,
    /// Davies-Bouldin index
    pub distance_spread_ratio: f64,
    /// Calinski-Harabasz index
    pub variance_ratio: f64,
}

/// Evaluate a keyed hard labelling against the standardized features
pub fn evaluate(data: ArrayView2<f64>, labels: &HardLabels) -> Result<EvaluationReport> {
    evaluate_labels(data, labels.labels(), labels.n_clusters())
}

/// Evaluate raw labels in row order
pub fn evaluate_labels(
    data: ArrayView2<f64>,
    labels: ArrayView1<usize>,
    n_clusters: usize,
) -> Result<EvaluationReport> {
    let clusters = validate_partition(data, labels, n_clusters)?;

    let report = EvaluationReport {
        cohesion_separation: silhouette(data, labels, &clusters),
        distance_spread_ratio: davies_bouldin(data, &clusters)?,
        variance_ratio: calinski_harabasz(data, labels, &clusters)?,
    };

    log::debug!(
        "Evaluation for k = {}: silhouette {:.4}, davies-bouldin {:.4}, calinski-harabasz {:.4}",
        n_clusters,
        report.cohesion_separation,
        report.distance_spread_ratio,
        report.variance_ratio
    );

    Ok(report)
}

/// Mean silhouette coefficient
pub fn silhouette_score(data: ArrayView2<f64>, labels: ArrayView1<usize>, n_clusters: usize) -> Result<f64> {
    let clusters = validate_partition(data, labels, n_clusters)?;
    Ok(silhouette(data, labels, &clusters))
}

/// Davies-Bouldin index
pub fn davies_bouldin_score(data: ArrayView2<f64>, labels: ArrayView1<usize>, n_clusters: usize) -> Result<f64> {
    let clusters = validate_partition(data, labels, n_clusters)?;
    davies_bouldin(data, &clusters)
}

/// Calinski-Harabasz index
pub fn calinski_harabasz_score(
    data: ArrayView2<f64>,
    labels: ArrayView1<usize>,
    n_clusters: usize,
) -> Result<f64> {
    let clusters = validate_partition(data, labels, n_clusters)?;
    calinski_harabasz(data, labels, &clusters)
}

/// Check shapes and cluster occupancy, returning member indices per cluster
fn validate_partition(
    data: ArrayView2<f64>,
    labels: ArrayView1<usize>,
    n_clusters: usize,
) -> Result<Vec<Vec<usize>>> {
    validate_data(data)?;

    let n_points = data.nrows();
    if labels.len() != n_points {
        return Err(Error::invalid_data(format!(
            "{} labels for {} rows",
            labels.len(),
            n_points
        )));
    }
    if let Some(&bad) = labels.iter().find(|&&l| l >= n_clusters) {
        return Err(Error::invalid_data(format!("Label {} outside 0..{}", bad, n_clusters)));
    }
    if n_clusters < 2 || n_clusters >= n_points {
        return Err(Error::degenerate_clustering(format!(
            "Metrics are undefined for {} clusters over {} regions",
            n_clusters, n_points
        )));
    }

    let clusters = get_cluster_indices(labels, n_clusters);
    let empty: Vec<usize> = clusters
        .iter()
        .enumerate()
        .filter(|(_, members)| members.is_empty())
        .map(|(c, _)| c)
        .collect();
    if !empty.is_empty() {
        return Err(Error::degenerate_clustering(format!("Empty clusters: {:?}", empty)));
    }

    Ok(clusters)
}

fn silhouette(data: ArrayView2<f64>, labels: ArrayView1<usize>, clusters: &[Vec<usize>]) -> f64 {
    let distances = pairwise_distances(data);
    let n_points = data.nrows();

    let scores: Vec<f64> = (0..n_points)
        .into_par_iter()
        .map(|i| {
            let own = labels[i];
            let own_size = clusters[own].len();
            if own_size == 1 {
                return 0.0;
            }

            let row = distances.row(i);
            let a = clusters[own].iter().map(|&j| row[j]).sum::<f64>() / (own_size - 1) as f64;
            let b = clusters
                .iter()
                .enumerate()
                .filter(|(c, _)| *c != own)
                .map(|(_, members)| members.iter().map(|&j| row[j]).sum::<f64>() / members.len() as f64)
                .fold(f64::INFINITY, f64::min);

            let denom = a.max(b);
            if denom == 0.0 {
                0.0
            } else {
                (b - a) / denom
            }
        })
        .collect();

    scores.iter().sum::<f64>() / n_points as f64
}

/// Unweighted mean of each cluster's members
fn hard_centroids(data: ArrayView2<f64>, clusters: &[Vec<usize>]) -> Array2<f64> {
    let mut centroids = Array2::zeros((clusters.len(), data.ncols()));
    for (c, members) in clusters.iter().enumerate() {
        let mean = data.select(Axis(0), members).sum_axis(Axis(0)) / members.len() as f64;
        centroids.row_mut(c).assign(&mean);
    }
    centroids
}

fn davies_bouldin(data: ArrayView2<f64>, clusters: &[Vec<usize>]) -> Result<f64> {
    let metric = EuclideanDistance;
    let centroids = hard_centroids(data, clusters);

    let mut spreads = Array1::<f64>::zeros(clusters.len());
    for (c, members) in clusters.iter().enumerate() {
        let mut total = 0.0;
        for &i in members {
            total += metric.distance(data.row(i), centroids.row(c))?;
        }
        spreads[c] = total / members.len() as f64;
    }

    let n_clusters = clusters.len();
    let mut sum_of_worst = 0.0;
    for i in 0..n_clusters {
        let mut worst: f64 = 0.0;
        for j in 0..n_clusters {
            if i == j {
                continue;
            }
            let separation = metric.distance(centroids.row(i), centroids.row(j))?;
            // coincident centroids contribute nothing
            if separation > 0.0 {
                worst = worst.max((spreads[i] + spreads[j]) / separation);
            }
        }
        sum_of_worst += worst;
    }

    Ok(sum_of_worst / n_clusters as f64)
}

fn calinski_harabasz(data: ArrayView2<f64>, labels: ArrayView1<usize>, clusters: &[Vec<usize>]) -> Result<f64> {
    let n_points = data.nrows() as f64;
    let n_clusters = clusters.len() as f64;
    let overall = data.sum_axis(Axis(0)) / n_points;
    let centroids = hard_centroids(data, clusters);

    let mut between = 0.0;
    for (c, members) in clusters.iter().enumerate() {
        let offset = &centroids.row(c) - &overall;
        between += members.len() as f64 * offset.mapv(|v| v * v).sum();
    }

    let mut within = 0.0;
    for (i, point) in data.rows().into_iter().enumerate() {
        let offset = &point - &centroids.row(labels[i]);
        within += offset.mapv(|v| v * v).sum();
    }

    if within == 0.0 {
        return Err(Error::degenerate_clustering(
            "Within-cluster dispersion is zero; variance ratio is undefined",
        ));
    }

    Ok(between * (n_points - n_clusters) / (within * (n_clusters - 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn line_data() -> Array2<f64> {
        arr2(&[[0.0], [1.0], [10.0], [11.0]])
    }

    #[test]
    fn test_silhouette_known_value() {
        let data = line_data();
        let labels = arr1(&[0, 0, 1, 1]);

        // point 0: a = 1, b = 10.5 -> 9.5 / 10.5 ; point 1: a = 1, b = 9.5 -> 8.5 / 9.5
        let expected = (9.5 / 10.5 + 8.5 / 9.5 + 8.5 / 9.5 + 9.5 / 10.5) / 4.0;
        let score = silhouette_score(data.view(), labels.view(), 2).unwrap();
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_davies_bouldin_known_value() {
        let data = line_data();
        let labels = arr1(&[0, 0, 1, 1]);

        // spreads 0.5 each, centroid distance 10
        let score = davies_bouldin_score(data.view(), labels.view(), 2).unwrap();
        assert!((score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_calinski_harabasz_known_value() {
        let data = line_data();
        let labels = arr1(&[0, 0, 1, 1]);

        // B = 2 * 5^2 * 2 = 100, W = 4 * 0.25 = 1, (n - k) / (k - 1) = 2
        let score = calinski_harabasz_score(data.view(), labels.view(), 2).unwrap();
        assert!((score - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_singleton_silhouette_is_zero() {
        let data = arr2(&[[0.0], [1.0], [2.0], [50.0]]);
        let labels = arr1(&[0, 0, 0, 1]);
        let score = silhouette_score(data.view(), labels.view(), 2).unwrap();

        // the singleton contributes 0, the others are positive
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_empty_cluster_is_degenerate() {
        let data = line_data();
        let labels = arr1(&[0, 0, 2, 2]);

        assert!(matches!(
            evaluate_labels(data.view(), labels.view(), 3),
            Err(Error::DegenerateClustering { .. })
        ));
    }

    #[test]
    fn test_k_equal_n_is_degenerate() {
        let data = line_data();
        let labels = arr1(&[0, 1, 2, 3]);

        assert!(matches!(
            calinski_harabasz_score(data.view(), labels.view(), 4),
            Err(Error::DegenerateClustering { .. })
        ));
    }

    #[test]
    fn test_zero_within_dispersion_is_degenerate() {
        let data = arr2(&[[0.0], [0.0], [5.0], [5.0]]);
        let labels = arr1(&[0, 0, 1, 1]);

        assert!(matches!(
            calinski_harabasz_score(data.view(), labels.view(), 2),
            Err(Error::DegenerateClustering { .. })
        ));
        assert_eq!(davies_bouldin_score(data.view(), labels.view(), 2).unwrap(), 0.0);
    }

    #[test]
    fn test_label_count_mismatch() {
        let data = line_data();
        let labels = arr1(&[0, 1]);
        assert!(matches!(
            evaluate_labels(data.view(), labels.view(), 2),
            Err(Error::InvalidData { .. })
        ));
    }
}
