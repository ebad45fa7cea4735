//! One clustering request end to end

use crate::error::Result;
use crate::evaluation::{evaluate, EvaluationReport};
use crate::fcm::{FcmResult, FuzzyCMeans};
use crate::labels::HardLabels;
use crate::projection::{project2d, Projection};
use crate::standardize::standardize;
use crate::table::IndicatorTable;
use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Standardize, cluster, label, evaluate and project an indicator table.
///
/// Holds configuration only. Every call to [`ClusteringPipeline::run`]
/// returns a fresh [`ClusterRun`]; nothing is remembered between calls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringPipeline {
    /// Optimizer settings
    pub fcm: FuzzyCMeans,
    /// Compute the 2-D projection
    pub project: bool,
}

/// Everything one request produces, handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterRun {
    /// Standardized feature matrix (`n_regions x n_indicators`)
    pub standardized: Array2<f64>,
    /// Optimizer output
    pub fcm: FcmResult,
    /// Hard label per region key
    pub labels: HardLabels,
    /// Cluster-quality scores, or why they are undefined for this partition.
    ///
    /// A run whose hard labels leave a cluster empty still carries its
    /// memberships, labels and projection.
    pub evaluation: Result<EvaluationReport>,
    /// 2-D projection, when requested
    pub projection: Option<Projection>,
}

impl ClusteringPipeline {
    /// Pipeline for `n_clusters` clusters with the default optimizer settings
    pub fn new(n_clusters: usize) -> Self {
        Self {
            fcm: FuzzyCMeans::new(n_clusters),
            project: true,
        }
    }

    /// Replace the optimizer settings
    pub fn with_fcm(mut self, fcm: FuzzyCMeans) -> Self {
        self.fcm = fcm;
        self
    }

    /// Set the random seed for reproducibility
    pub fn random_state(mut self, seed: u64) -> Self {
        self.fcm = self.fcm.random_state(seed);
        self
    }

    /// Enable or disable the 2-D projection
    pub fn project(mut self, project: bool) -> Self {
        self.project = project;
        self
    }

    /// Run one request against a table
    pub fn run(&self, table: &IndicatorTable) -> Result<ClusterRun> {
        log::info!(
            "Clustering {} regions x {} indicators into {} clusters",
            table.n_regions(),
            table.columns().len(),
            self.fcm.n_clusters
        );

        let standardized = standardize(table.values())?;
        let fcm = self.fcm.fit(standardized.view())?;
        let labels = HardLabels::new(table.keys().to_vec(), fcm.membership.view())?;
        let evaluation = evaluate(standardized.view(), &labels);
        if let Err(err) = &evaluation {
            log::warn!("Cluster evaluation unavailable: {}", err);
        }
        let projection = if self.project {
            Some(project2d(standardized.view())?)
        } else {
            None
        };

        Ok(ClusterRun {
            standardized,
            fcm,
            labels,
            evaluation,
            projection,
        })
    }
}

impl ClusterRun {
    /// Regions per cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.labels.cluster_sizes()
    }

    /// Membership rows as `(key, memberships per cluster)` for tabular display
    pub fn membership_table(&self) -> Vec<(&str, Vec<f64>)> {
        self.labels
            .keys()
            .iter()
            .zip(self.fcm.membership.columns())
            .map(|(key, column)| (key.as_str(), column.to_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::table::MissingValuePolicy;

    fn table() -> IndicatorTable {
        IndicatorTable::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                ("r1", vec![Some(1.0), Some(1.0)]),
                ("r2", vec![Some(1.2), None]),
                ("r3", vec![Some(9.0), Some(8.0)]),
                ("r4", vec![Some(9.5), Some(8.5)]),
            ],
            MissingValuePolicy::Zero,
        )
        .unwrap()
    }

    #[test]
    fn test_run_produces_all_outputs() {
        let run = ClusteringPipeline::new(2).random_state(1).run(&table()).unwrap();

        assert_eq!(run.standardized.dim(), (4, 2));
        assert_eq!(run.labels.len(), 4);
        assert_eq!(run.cluster_sizes().iter().sum::<usize>(), 4);
        assert_eq!(run.projection.as_ref().unwrap().points.nrows(), 4);
        assert_eq!(run.membership_table().len(), 4);
        assert_eq!(run.labels.get("r3"), run.labels.get("r4"));
    }

    #[test]
    fn test_projection_optional() {
        let run = ClusteringPipeline::new(2).project(false).run(&table()).unwrap();
        assert!(run.projection.is_none());
    }

    #[test]
    fn test_degenerate_partition_keeps_memberships() {
        // identical rows leave every region in cluster 0
        let table = IndicatorTable::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                ("r1", vec![Some(0.1), Some(0.3)]),
                ("r2", vec![Some(0.1), Some(0.3)]),
                ("r3", vec![Some(0.1), Some(0.3)]),
            ],
            MissingValuePolicy::Zero,
        )
        .unwrap();
        let run = ClusteringPipeline::new(2).random_state(5).run(&table).unwrap();

        assert!(run.standardized.iter().all(|&v| v == 0.0));
        assert!(matches!(run.evaluation, Err(Error::DegenerateClustering { .. })));
        assert_eq!(run.labels.len(), 3);
        assert_eq!(run.cluster_sizes(), vec![3, 0]);
        assert_eq!(run.membership_table().len(), 3);
        assert!(run.projection.is_some());
    }

    #[test]
    fn test_constant_indicator_standardizes_to_zero() {
        let table = IndicatorTable::from_rows(
            vec!["a".into(), "flat".into()],
            vec![
                ("r1", vec![Some(1.0), Some(0.1)]),
                ("r2", vec![Some(1.2), Some(0.1)]),
                ("r3", vec![Some(9.0), Some(0.1)]),
                ("r4", vec![Some(9.5), Some(0.1)]),
            ],
            MissingValuePolicy::Zero,
        )
        .unwrap();
        let run = ClusteringPipeline::new(2).random_state(1).run(&table).unwrap();

        assert!(run.standardized.column(1).iter().all(|&v| v == 0.0));
        assert!(run.evaluation.is_ok());
        assert_eq!(run.labels.get("r1"), run.labels.get("r2"));
        assert_ne!(run.labels.get("r1"), run.labels.get("r3"));
    }

    #[test]
    fn test_invalid_k() {
        let result = ClusteringPipeline::new(4).run(&table());
        assert!(matches!(result, Err(Error::InvalidClusterRequest { .. })));
    }
}
