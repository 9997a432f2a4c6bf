//! IQR outlier rule applied per species and per variable.
//!
//! ```text
//!   IrisDataset
//!       │  subgroup(species)            (rows in dataset order)
//!       ▼
//!   Vec<&Observation>  ── position k ──► row.id  (RowId, global identity)
//!       │
//!       ├── find_outliers   → positions inside the subgroup (report only)
//!       └── remove_outliers → union of flagged RowIds → IrisDataset::without
//! ```

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use log::debug;

use super::stats::{quantile_sorted, sorted_present};
use crate::data::model::{IrisDataset, Observation, RowId, Species, Variable};

/// Tukey fence multiplier.
pub const IQR_FACTOR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// Fences from the present values; `None` when there are none.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let sorted = sorted_present(values);
        if sorted.is_empty() {
            return None;
        }
        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        Some(Bounds {
            q1,
            q3,
            lower: q1 - IQR_FACTOR * iqr,
            upper: q3 + IQR_FACTOR * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Inclusive: a value sitting exactly on the fence counts.
    pub fn is_low(&self, value: f64) -> bool {
        value <= self.lower
    }

    /// Inclusive: a value sitting exactly on the fence counts.
    pub fn is_high(&self, value: f64) -> bool {
        value >= self.upper
    }
}

// ---------------------------------------------------------------------------
// Per (species, variable) findings
// ---------------------------------------------------------------------------

/// Outliers of one variable inside one species subgroup. Positions index the
/// subgroup, not the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableOutliers {
    pub variable: Variable,
    pub bounds: Option<Bounds>,
    pub low_positions: Vec<usize>,
    pub high_positions: Vec<usize>,
}

impl VariableOutliers {
    fn scan(group: &[&Observation], variable: Variable) -> Self {
        let values: Vec<Option<f64>> = group.iter().map(|row| row.value(variable)).collect();
        let bounds = Bounds::from_values(&values);

        let mut low_positions = Vec::new();
        let mut high_positions = Vec::new();
        if let Some(b) = &bounds {
            for (pos, value) in values.iter().enumerate() {
                let Some(v) = *value else { continue };
                if b.is_high(v) {
                    high_positions.push(pos);
                }
                if b.is_low(v) {
                    low_positions.push(pos);
                }
            }
        }

        VariableOutliers {
            variable,
            bounds,
            low_positions,
            high_positions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.low_positions.is_empty() && self.high_positions.is_empty()
    }

    /// All flagged positions, each once, ascending.
    pub fn positions(&self) -> BTreeSet<usize> {
        self.low_positions
            .iter()
            .chain(&self.high_positions)
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesOutliers {
    pub species: Species,
    pub group_size: usize,
    pub variables: Vec<VariableOutliers>,
}

/// Read-only outcome of the IQR scan over every species and variable.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    pub groups: Vec<SpeciesOutliers>,
}

impl OutlierReport {
    pub fn flagged_cells(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.variables)
            .map(|v| v.positions().len())
            .sum()
    }
}

/// Scan each species (order of first appearance) and each variable (column
/// order). The dataset is not touched.
pub fn find_outliers(dataset: &IrisDataset) -> OutlierReport {
    let groups = dataset
        .species_in_order_of_appearance()
        .into_iter()
        .map(|species| {
            let group = dataset.subgroup(species);
            debug!("scanning {} rows of {species}", group.len());
            SpeciesOutliers {
                species,
                group_size: group.len(),
                variables: Variable::ALL
                    .iter()
                    .map(|&variable| VariableOutliers::scan(&group, variable))
                    .collect(),
            }
        })
        .collect();
    OutlierReport { groups }
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

/// Result of a single cleanup pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleanup {
    pub cleaned: IrisDataset,
    pub removed: BTreeSet<RowId>,
}

/// Drop every row flagged on any variable within its own species. One pass:
/// fences are not recomputed on the shrunken groups.
pub fn remove_outliers(dataset: &IrisDataset) -> Cleanup {
    let mut removed = BTreeSet::new();

    for species in dataset.species_in_order_of_appearance() {
        let group = dataset.subgroup(species);
        for &variable in &Variable::ALL {
            let found = VariableOutliers::scan(&group, variable);
            // subgroup position -> dataset identity
            removed.extend(found.positions().into_iter().map(|pos| group[pos].id));
        }
        debug!("{species}: {} rows flagged so far", removed.len());
    }

    Cleanup {
        cleaned: dataset.without(&removed),
        removed,
    }
}

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

impl fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            write!(f, "\n>>> Outlier summary for {} <<<\n", group.species)?;
            for var in &group.variables {
                match (&var.bounds, var.is_empty()) {
                    (Some(b), false) => write!(
                        f,
                        "\n\t\tOutliers found for {}: \n\
                         \t\t\tLower bound ({}): {} \n\
                         \t\t\tUpper bound ({}): {}\n",
                        var.variable,
                        fmt_bound(b.lower),
                        fmt_positions(&var.low_positions),
                        fmt_bound(b.upper),
                        fmt_positions(&var.high_positions),
                    )?,
                    _ => write!(f, "\n\t\tNo outliers found for {}\n", var.variable)?,
                }
            }
        }
        Ok(())
    }
}

fn fmt_bound(v: f64) -> String {
    format!("{v:.4}")
}

fn fmt_positions(positions: &[usize]) -> String {
    let mut out = String::from("[");
    for (i, p) in positions.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{p}");
    }
    out.push(']');
    out
}
