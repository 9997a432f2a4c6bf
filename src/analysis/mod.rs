//! Analysis core: stateless operations over an [`IrisDataset`].
//!
//! ```text
//!   IrisDataset ──► summary   → report text
//!               ──► outliers  → OutlierReport | Cleanup { cleaned, removed }
//!               ──► pca       → ReducedDataset (pc1, pc2, species)
//! ```
//!
//! [`IrisDataset`]: crate::data::model::IrisDataset

use thiserror::Error;

use crate::data::model::{RowId, Variable};

pub mod outliers;
pub mod pca;
pub mod stats;
pub mod summary;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("dataset has no rows")]
    EmptyDataset,

    #[error("row {row} has no value for {variable}")]
    MissingValue { row: RowId, variable: Variable },

    #[error("{requested} components requested but only {available} features available")]
    TooManyComponents { requested: usize, available: usize },

    #[error("expected {expected} features, got {found}")]
    FeatureMismatch { expected: usize, found: usize },
}
