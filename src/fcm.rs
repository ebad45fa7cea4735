//! Fuzzy c-means clustering

use crate::distance::{Distance, EuclideanDistance};
use crate::error::{Error, Result};
use crate::initialization::random_membership;
use crate::labels::resolve_labels;
use crate::utils::{validate_cluster_count, validate_data, validate_parameters};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::prelude::*;
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seed used when no `random_state` is given
pub const DEFAULT_SEED: u64 = 42;

/// Fuzzy c-means clustering for standardized numeric features
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuzzyCMeans {
    /// Number of clusters
    pub n_clusters: usize,
    /// Fuzziness exponent `m`
    pub fuzziness: f64,
    /// Stop once the Frobenius norm of the membership update drops below this
    pub tol: f64,
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Number of restarts; the lowest final objective wins
    pub n_init: usize,
    /// Random seed for reproducibility
    pub random_state: Option<u64>,
}

/// Result of a fuzzy c-means fit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FcmResult {
    /// Cluster centroids (`n_clusters x n_features`)
    pub centroids: Array2<f64>,
    /// Membership matrix (`n_clusters x n_points`), each column sums to 1
    pub membership: Array2<f64>,
    /// Number of iterations run
    pub n_iter: usize,
    /// Whether the tolerance was reached before `max_iter`
    pub converged: bool,
    /// Objective `J` after each iteration
    pub objective_history: Vec<f64>,
    /// Fuzzy partition coefficient, from `1/k` (fully fuzzy) to 1 (crisp)
    pub partition_coefficient: f64,
}

impl FcmResult {
    /// Final value of the objective
    pub fn objective(&self) -> f64 {
        self.objective_history.last().copied().unwrap_or(f64::INFINITY)
    }

    /// Number of clusters
    pub fn n_clusters(&self) -> usize {
        self.membership.nrows()
    }

    /// Arg-max hard label for every point
    pub fn hard_labels(&self) -> Array1<usize> {
        resolve_labels(self.membership.view())
    }
}

impl Default for FuzzyCMeans {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            fuzziness: 2.0,
            tol: 0.005,
            max_iter: 1000,
            n_init: 1,
            random_state: None,
        }
    }
}

impl FuzzyCMeans {
    /// Create a new clusterer with the specified number of clusters
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Default::default()
        }
    }

    /// Set the fuzziness exponent `m`
    pub fn fuzziness(mut self, m: f64) -> Self {
        self.fuzziness = m;
        self
    }

    /// Set the convergence tolerance
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the maximum number of iterations
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the number of restarts
    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the random seed for reproducibility
    pub fn random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Fit to a standardized `n_points x n_features` matrix.
    ///
    /// Restart `i` is seeded with `random_state + i`. Restarts run in parallel
    /// but are compared in restart order, so the result is reproducible.
    pub fn fit(&self, data: ArrayView2<f64>) -> Result<FcmResult> {
        self.validate_input(data)?;
        let base_seed = self.random_state.unwrap_or(DEFAULT_SEED);

        let results: Vec<Result<FcmResult>> = if self.n_init > 1 {
            (0..self.n_init)
                .into_par_iter()
                .map(|i| {
                    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                    self.fit_single(data, &mut rng)
                })
                .collect()
        } else {
            let mut rng = StdRng::seed_from_u64(base_seed);
            vec![self.fit_single(data, &mut rng)]
        };

        select_best(results)
    }

    /// Fit using a caller-supplied random source; restarts draw from it in turn
    pub fn fit_with_rng<R: Rng>(&self, data: ArrayView2<f64>, rng: &mut R) -> Result<FcmResult> {
        self.validate_input(data)?;

        let mut results = Vec::with_capacity(self.n_init);
        for _ in 0..self.n_init {
            results.push(self.fit_single(data, &mut *rng));
        }

        select_best(results)
    }

    /// Fit the model and return the hard labels
    pub fn fit_predict(&self, data: ArrayView2<f64>) -> Result<Array1<usize>> {
        Ok(self.fit(data)?.hard_labels())
    }

    /// Single run of the alternating optimization
    fn fit_single<R: Rng>(&self, data: ArrayView2<f64>, rng: &mut R) -> Result<FcmResult> {
        let m = self.fuzziness;
        let mut membership = random_membership(self.n_clusters, data.nrows(), rng)?;
        let mut centroids = Array2::zeros((self.n_clusters, data.ncols()));
        let mut objective_history = Vec::new();
        let mut n_iter = 0;
        let mut converged = false;

        for iter in 0..self.max_iter {
            n_iter = iter + 1;

            let weights = membership.mapv(|u| u.powf(m));
            centroids = weighted_centroids(data, weights.view(), centroids)?;

            let (updated, objective) = update_memberships(data, centroids.view(), weights.view(), m)?;
            objective_history.push(objective);

            let change = (&updated - &membership).mapv(|d| d * d).sum().sqrt();
            membership = updated;

            log::debug!("FCM iteration {}: objective {:.6}, change {:.6}", n_iter, objective, change);

            if change < self.tol {
                converged = true;
                log::info!("Fuzzy c-means converged after {} iterations", n_iter);
                break;
            }
        }

        if !converged {
            log::warn!(
                "Fuzzy c-means stopped at max_iter = {} without reaching tol = {}",
                self.max_iter,
                self.tol
            );
        }

        let partition_coefficient = partition_coefficient(membership.view());

        Ok(FcmResult {
            centroids,
            membership,
            n_iter,
            converged,
            objective_history,
            partition_coefficient,
        })
    }

    /// Validate input parameters and data
    fn validate_input(&self, data: ArrayView2<f64>) -> Result<()> {
        validate_parameters(self.fuzziness, self.max_iter, self.tol, self.n_init)?;
        validate_cluster_count(self.n_clusters, data.nrows())?;
        validate_data(data)
    }
}

/// Fit `n_clusters` clusters with a fixed seed and the default optimizer
/// settings (`m = 2`, `tol = 0.005`, `max_iter = 1000`, one restart).
///
/// To change the fuzziness exponent, tolerance, iteration cap or restart
/// count, build a [`FuzzyCMeans`] instead:
///
/// ```rust
/// use fuzzy_regions::FuzzyCMeans;
/// # let data = ndarray::arr2(&[[0.0, 0.0], [0.1, 0.0], [5.0, 5.0], [5.1, 5.0]]);
/// let result = FuzzyCMeans::new(2)
///     .fuzziness(1.5)
///     .tolerance(1e-4)
///     .max_iter(300)
///     .random_state(42)
///     .fit(data.view())
///     .unwrap();
/// assert_eq!(result.n_clusters(), 2);
/// ```
pub fn fit_fcm(data: ArrayView2<f64>, n_clusters: usize, seed: u64) -> Result<FcmResult> {
    FuzzyCMeans::new(n_clusters).random_state(seed).fit(data)
}

/// Pick the run with the lowest final objective; earlier runs win ties
fn select_best(results: Vec<Result<FcmResult>>) -> Result<FcmResult> {
    let mut best: Option<FcmResult> = None;

    for result in results {
        let result = result?;
        let better = best
            .as_ref()
            .map_or(true, |b| result.objective() < b.objective());
        if better {
            best = Some(result);
        }
    }

    best.ok_or_else(|| Error::invalid_cluster_request("No restarts were run"))
}

/// `centroid_c = sum_r w[c][r] x_r / sum_r w[c][r]`.
///
/// A cluster whose weights are all zero keeps its previous centroid.
fn weighted_centroids(
    data: ArrayView2<f64>,
    weights: ArrayView2<f64>,
    previous: Array2<f64>,
) -> Result<Array2<f64>> {
    if weights.ncols() != data.nrows() {
        return Err(Error::invalid_data("Membership and data point counts differ"));
    }

    let mut centroids = weights.dot(&data);
    let totals = weights.sum_axis(Axis(1));

    for (c, mut row) in centroids.rows_mut().into_iter().enumerate() {
        if totals[c] > 0.0 {
            row.mapv_inplace(|v| v / totals[c]);
        } else {
            row.assign(&previous.row(c));
        }
    }

    Ok(centroids)
}

/// New memberships from point-to-centroid distances, plus the objective
/// `sum_c sum_r w[c][r] d(x_r, c)^2` of the weights that produced the centroids.
fn update_memberships(
    data: ArrayView2<f64>,
    centroids: ArrayView2<f64>,
    weights: ArrayView2<f64>,
    m: f64,
) -> Result<(Array2<f64>, f64)> {
    let n_clusters = centroids.nrows();
    let exponent = 2.0 / (m - 1.0);
    let metric = EuclideanDistance;

    let mut membership = Array2::zeros((n_clusters, data.nrows()));
    let mut objective = 0.0;

    for (r, point) in data.rows().into_iter().enumerate() {
        let distances = metric.distances_to_centroids(point, centroids)?;

        for (c, d) in distances.iter().enumerate() {
            objective += weights[[c, r]] * d * d;
        }

        // Point sits on a centroid: crisp membership, first matching cluster.
        if let Some(hit) = distances.iter().position(|&d| d == 0.0) {
            membership[[hit, r]] = 1.0;
            continue;
        }

        for c in 0..n_clusters {
            let ratio_sum: f64 = distances
                .iter()
                .map(|&other| (distances[c] / other).powf(exponent))
                .sum();
            membership[[c, r]] = 1.0 / ratio_sum;
        }
    }

    Ok((membership, objective))
}

/// Fuzzy partition coefficient `sum(u^2) / n_points`
pub fn partition_coefficient(membership: ArrayView2<f64>) -> f64 {
    let n_points = membership.ncols();
    if n_points == 0 {
        return 0.0;
    }
    membership.iter().map(|u| u * u).sum::<f64>() / n_points as f64
}
