use std::cmp::Ordering;

use log::debug;
use ndarray::{Array1, Array2, Axis};

use super::AnalysisError;
use crate::data::model::{IrisDataset, Species, Variable};

pub type Matrix = Array2<f64>;
pub type Vector = Array1<f64>;

const JACOBI_MAX_SWEEPS: usize = 64;
const JACOBI_TOLERANCE: f64 = 1e-14;

// ---------------------------------------------------------------------------
// Standard scaling
// ---------------------------------------------------------------------------

/// Column-wise z-score with population statistics, fitted on the whole
/// matrix. A constant column is divided by 1.
#[derive(Clone, Debug)]
pub struct StandardScaler {
    pub mean: Vector,
    pub scale: Vector,
}

impl StandardScaler {
    pub fn fit(x: &Matrix) -> Result<Self, AnalysisError> {
        let mean = x.mean_axis(Axis(0)).ok_or(AnalysisError::EmptyDataset)?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });
        Ok(StandardScaler { mean, scale })
    }

    pub fn transform(&self, x: &Matrix) -> Matrix {
        (x - &self.mean.view().insert_axis(Axis(0))) / &self.scale.view().insert_axis(Axis(0))
    }

    pub fn fit_transform(x: &Matrix) -> Result<Matrix, AnalysisError> {
        Ok(Self::fit(x)?.transform(x))
    }
}

// ---------------------------------------------------------------------------
// Principal components
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Pca {
    /// One row per component, loadings over the input features.
    pub components: Matrix,
    pub explained_variance: Vector,
    pub explained_variance_ratio: Vector,
    pub mean: Vector,
}

impl Pca {
    /// Fit the leading `n_components` axes of the covariance matrix.
    pub fn fit(x: &Matrix, n_components: usize) -> Result<Self, AnalysisError> {
        let (n_samples, n_features) = x.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(AnalysisError::EmptyDataset);
        }
        if n_components > n_features {
            return Err(AnalysisError::TooManyComponents {
                requested: n_components,
                available: n_features,
            });
        }

        let mean = x.mean_axis(Axis(0)).ok_or(AnalysisError::EmptyDataset)?;
        let centered = x - &mean.view().insert_axis(Axis(0));
        let denom = if n_samples > 1 { (n_samples - 1) as f64 } else { 1.0 };
        let cov = centered.t().dot(&centered) / denom;

        let (eigenvalues, eigenvectors) = symmetric_eigen(cov);

        let mut order: Vec<usize> = (0..n_features).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(Ordering::Equal)
        });

        let mut components = Matrix::zeros((n_components, n_features));
        for (i, &col) in order.iter().take(n_components).enumerate() {
            let mut axis = eigenvectors.column(col).to_owned();
            // deterministic sign: largest-magnitude loading is positive
            let pivot = axis
                .iter()
                .copied()
                .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
            if pivot < 0.0 {
                axis.mapv_inplace(|v| -v);
            }
            components.row_mut(i).assign(&axis);
        }

        let explained_variance: Vector = order
            .iter()
            .take(n_components)
            .map(|&col| eigenvalues[col].max(0.0))
            .collect();
        let total: f64 = eigenvalues.iter().map(|v| v.max(0.0)).sum();
        let explained_variance_ratio = if total > 0.0 {
            &explained_variance / total
        } else {
            Vector::zeros(n_components)
        };

        Ok(Pca {
            components,
            explained_variance,
            explained_variance_ratio,
            mean,
        })
    }

    pub fn transform(&self, x: &Matrix) -> Result<Matrix, AnalysisError> {
        if x.ncols() != self.mean.len() {
            return Err(AnalysisError::FeatureMismatch {
                expected: self.mean.len(),
                found: x.ncols(),
            });
        }
        let centered = x - &self.mean.view().insert_axis(Axis(0));
        Ok(centered.dot(&self.components.t()))
    }
}

/// Cyclic Jacobi rotation for a real symmetric matrix. Returns eigenvalues
/// and the matching eigenvectors as columns.
fn symmetric_eigen(mut a: Matrix) -> (Vector, Matrix) {
    let n = a.nrows();
    let mut v = Matrix::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| a[[i, j]].powi(2))
            .sum();
        if off < JACOBI_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq.abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

// ---------------------------------------------------------------------------
// Iris pipeline: standardize → project → reattach species
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedRow {
    pub pc1: f64,
    pub pc2: f64,
    pub species: Species,
}

/// Two-component projection, one row per input row in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedDataset {
    pub rows: Vec<ReducedRow>,
    /// Share of total variance captured by PC1 and PC2.
    pub explained_variance_ratio: [f64; 2],
}

impl ReducedDataset {
    pub const COLUMNS: [&'static str; 3] = ["PCA_1", "PCA_2", "species"];

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn reduce_dimensions(dataset: &IrisDataset) -> Result<ReducedDataset, AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let mut x = Matrix::zeros((dataset.len(), Variable::ALL.len()));
    for (i, row) in dataset.rows().iter().enumerate() {
        for (j, &var) in Variable::ALL.iter().enumerate() {
            x[[i, j]] = row.value(var).ok_or(AnalysisError::MissingValue {
                row: row.id,
                variable: var,
            })?;
        }
    }

    let standardized = StandardScaler::fit_transform(&x)?;
    let pca = Pca::fit(&standardized, 2)?;
    let projected = pca.transform(&standardized)?;
    debug!(
        "PCA explained variance ratio: {:.4} / {:.4}",
        pca.explained_variance_ratio[0], pca.explained_variance_ratio[1]
    );

    // positional alignment: projection keeps row order and count
    let rows = projected
        .axis_iter(Axis(0))
        .zip(dataset.rows())
        .map(|(pc, row)| ReducedRow {
            pc1: pc[0],
            pc2: pc[1],
            species: row.species,
        })
        .collect();

    Ok(ReducedDataset {
        rows,
        explained_variance_ratio: [
            pca.explained_variance_ratio[0],
            pca.explained_variance_ratio[1],
        ],
    })
}
