//! Hard labels from fuzzy memberships

use crate::error::{Error, Result};
use crate::utils::cluster_sizes;
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arg-max cluster for every column of an `n_clusters x n_points` membership
/// matrix. On an exact tie the lowest cluster index wins.
pub fn resolve_labels(membership: ArrayView2<f64>) -> Array1<usize> {
    membership
        .columns()
        .into_iter()
        .map(|column| {
            let mut best = 0;
            for (c, &u) in column.iter().enumerate().skip(1) {
                if u > column[best] {
                    best = c;
                }
            }
            best
        })
        .collect()
}

/// Hard label assignment keyed by region, in table row order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HardLabels {
    keys: Vec<String>,
    labels: Array1<usize>,
    n_clusters: usize,
    index: HashMap<String, usize>,
}

impl HardLabels {
    /// Resolve labels from a membership matrix and attach region keys
    pub fn new(keys: Vec<String>, membership: ArrayView2<f64>) -> Result<Self> {
        if keys.len() != membership.ncols() {
            return Err(Error::invalid_data(format!(
                "{} region keys for {} membership columns",
                keys.len(),
                membership.ncols()
            )));
        }
        Self::from_labels(keys, resolve_labels(membership), membership.nrows())
    }

    /// Wrap labels produced elsewhere. Every label must be below `n_clusters`.
    pub fn from_labels(keys: Vec<String>, labels: Array1<usize>, n_clusters: usize) -> Result<Self> {
        if keys.len() != labels.len() {
            return Err(Error::invalid_data(format!(
                "{} region keys for {} labels",
                keys.len(),
                labels.len()
            )));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_clusters) {
            return Err(Error::invalid_data(format!(
                "Label {} outside 0..{}",
                bad, n_clusters
            )));
        }

        let mut index = HashMap::with_capacity(keys.len());
        for (row, key) in keys.iter().enumerate() {
            if index.insert(key.clone(), row).is_some() {
                return Err(Error::invalid_data(format!("Duplicate region key '{}'", key)));
            }
        }

        Ok(Self {
            keys,
            labels,
            n_clusters,
            index,
        })
    }

    /// Cluster index for a region key
    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&row| self.labels[row])
    }

    /// `(key, label)` pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.keys.iter().map(String::as_str).zip(self.labels.iter().copied())
    }

    /// Labels in row order
    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    /// Region keys in row order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of clusters the labels were drawn from
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of labelled regions
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no region is labelled
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Regions per cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        cluster_sizes(self.labels.view(), self.n_clusters)
    }
}
