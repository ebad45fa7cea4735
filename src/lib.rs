//! # Fuzzy clustering of regional indicator tables
//!
//! This crate groups administrative regions into clusters of similar
//! socio-economic profile using fuzzy c-means, and scores the result.
//!
//! ## Features
//!
//! - **Standardization**: per-column z-scores with population variance
//! - **Fuzzy c-means**: seeded, reproducible soft memberships and centroids
//! - **Hard labels**: arg-max with lowest-index tie breaking, keyed by region
//! - **Evaluation**: silhouette, Davies-Bouldin and Calinski-Harabasz scores
//! - **Projection**: first two principal components for scatter plots
//! - Sector narratives and map-join helpers for the presentation layer
//!
//! ## Example
//!
//! ```rust
//! use fuzzy_regions::{evaluate, standardize, FuzzyCMeans, HardLabels};
//! use ndarray::Array2;
//!
//! let data = Array2::from_shape_vec((5, 3), vec![
//!     10.0, 2.0, 1.0,
//!     11.0, 2.0, 1.0,
//!     1.0, 9.0, 8.0,
//!     1.0, 10.0, 9.0,
//!     5.0, 5.0, 5.0,
//! ]).unwrap();
//! let keys = ["A", "B", "C", "D", "E"].map(String::from).to_vec();
//!
//! let z = standardize(data.view()).unwrap();
//! let result = FuzzyCMeans::new(2).random_state(42).fit(z.view()).unwrap();
//! let labels = HardLabels::new(keys, result.membership.view()).unwrap();
//! let report = evaluate(z.view(), &labels).unwrap();
//!
//! assert_eq!(labels.get("A"), labels.get("B"));
//! assert!(report.cohesion_separation > 0.0);
//! ```

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod fcm;
pub mod geo;
pub mod initialization;
pub mod labels;
pub mod pipeline;
pub mod projection;
pub mod sector;
pub mod standardize;
pub mod table;
pub mod utils;

pub use error::{Error, Result};
pub use evaluation::{evaluate, evaluate_labels, EvaluationReport};
pub use fcm::{fit_fcm, FcmResult, FuzzyCMeans};
pub use geo::{join_labels, normalize_region_key, MapJoin};
pub use labels::{resolve_labels, HardLabels};
pub use pipeline::{ClusterRun, ClusteringPipeline};
pub use projection::{project2d, Projection};
pub use sector::Sector;
pub use standardize::{standardize, Standardizer};
pub use table::{IndicatorTable, MissingValuePolicy};

/// Re-export commonly used types from ndarray
pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_functionality() {
        let fcm = FuzzyCMeans::default();
        assert_eq!(fcm.fuzziness, 2.0);
        assert_eq!(MissingValuePolicy::default(), MissingValuePolicy::Zero);
    }
}
