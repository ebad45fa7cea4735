//! Error types for the fuzzy clustering engine

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while standardizing, clustering or evaluating
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Error {
    /// Cluster count or optimizer parameters out of bounds
    #[error("Invalid cluster request: {message}")]
    InvalidClusterRequest {
        /// Error message
        message: String,
    },

    /// NaN or infinite value reached the optimizer
    #[error("Non-finite input: {message}")]
    NonFiniteInput {
        /// Error message
        message: String,
    },

    /// Empty cluster, or a metric that is undefined for the given partition
    #[error("Degenerate clustering: {message}")]
    DegenerateClustering {
        /// Error message
        message: String,
    },

    /// Malformed table or mismatched shapes
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a new InvalidClusterRequest error
    pub fn invalid_cluster_request(message: impl Into<String>) -> Self {
        Self::InvalidClusterRequest {
            message: message.into(),
        }
    }

    /// Create a new NonFiniteInput error
    pub fn non_finite_input(message: impl Into<String>) -> Self {
        Self::NonFiniteInput {
            message: message.into(),
        }
    }

    /// Create a new DegenerateClustering error
    pub fn degenerate_clustering(message: impl Into<String>) -> Self {
        Self::DegenerateClustering {
            message: message.into(),
        }
    }

    /// Create a new InvalidData error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
