use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Species – the categorical label of one row
// ---------------------------------------------------------------------------

/// The three Iris species. `Ord` follows the label text, which is also the
/// grouping order used by the descriptive summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown species label '{0}'")]
pub struct ParseSpeciesError(pub String);

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "setosa" | "iris-setosa" => Ok(Species::Setosa),
            "versicolor" | "iris-versicolor" => Ok(Species::Versicolor),
            "virginica" | "iris-virginica" => Ok(Species::Virginica),
            _ => Err(ParseSpeciesError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Variable – one of the four numeric measurement columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Variable {
    /// Column order of the dataset.
    pub const ALL: [Variable; 4] = [
        Variable::SepalLength,
        Variable::SepalWidth,
        Variable::PetalLength,
        Variable::PetalWidth,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Variable::SepalLength => "sepal_length",
            Variable::SepalWidth => "sepal_width",
            Variable::PetalLength => "petal_length",
            Variable::PetalWidth => "petal_width",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Name of the categorical column.
pub const SPECIES_COLUMN: &str = "species";

// ---------------------------------------------------------------------------
// Observation – one row of the table
// ---------------------------------------------------------------------------

/// Stable identity of a row, assigned in load order and kept through filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: RowId,
    /// Measurements in [`Variable::ALL`] order; `None` is a missing cell.
    pub measurements: [Option<f64>; 4],
    pub species: Species,
}

impl Observation {
    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.measurements[variable.index()]
    }
}

// ---------------------------------------------------------------------------
// IrisDataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IrisDataset {
    rows: Vec<Observation>,
}

impl IrisDataset {
    /// Build a dataset from raw records, assigning row ids in order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ([Option<f64>; 4], Species)>,
    {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, (measurements, species))| Observation {
                id: RowId(i),
                measurements,
                species,
            })
            .collect();
        IrisDataset { rows }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|row| row.id)
    }

    /// Distinct species in the order they first occur.
    pub fn species_in_order_of_appearance(&self) -> Vec<Species> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.species) {
                seen.push(row.species);
            }
        }
        seen
    }

    /// Rows of one species, in dataset order.
    pub fn subgroup(&self, species: Species) -> Vec<&Observation> {
        self.rows.iter().filter(|row| row.species == species).collect()
    }

    /// All species subgroups keyed (and therefore sorted) by species.
    pub fn partition(&self) -> BTreeMap<Species, Vec<&Observation>> {
        let mut groups: BTreeMap<Species, Vec<&Observation>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.species).or_default().push(row);
        }
        groups
    }

    pub fn column(&self, variable: Variable) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.value(variable)).collect()
    }

    /// A new dataset without the given rows. Ids and order of the kept rows
    /// are unchanged.
    pub fn without(&self, removed: &BTreeSet<RowId>) -> IrisDataset {
        IrisDataset {
            rows: self
                .rows
                .iter()
                .filter(|row| !removed.contains(&row.id))
                .cloned()
                .collect(),
        }
    }

    /// Whether every measurement of every row is present.
    pub fn is_complete(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.measurements.iter().all(Option::is_some))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IrisDataset {
        IrisDataset::from_records(vec![
            ([Some(5.0), Some(3.0), Some(1.0), Some(0.2)], Species::Virginica),
            ([Some(5.1), Some(3.1), Some(1.1), Some(0.3)], Species::Setosa),
            ([Some(5.2), None, Some(1.2), Some(0.4)], Species::Virginica),
        ])
    }

    #[test]
    fn species_parse_accepts_uci_labels() {
        assert_eq!("Iris-setosa".parse::<Species>(), Ok(Species::Setosa));
        assert_eq!(" virginica ".parse::<Species>(), Ok(Species::Virginica));
        assert!("rose".parse::<Species>().is_err());
    }

    #[test]
    fn appearance_order_differs_from_sorted_order() {
        let ds = sample();
        assert_eq!(
            ds.species_in_order_of_appearance(),
            vec![Species::Virginica, Species::Setosa]
        );
        let sorted: Vec<Species> = ds.partition().keys().copied().collect();
        assert_eq!(sorted, vec![Species::Setosa, Species::Virginica]);
    }

    #[test]
    fn without_keeps_ids_and_order() {
        let ds = sample();
        let removed = BTreeSet::from([RowId(1)]);
        let kept = ds.without(&removed);
        assert_eq!(kept.ids().collect::<Vec<_>>(), vec![RowId(0), RowId(2)]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn missing_cell_makes_dataset_incomplete() {
        let ds = sample();
        assert!(!ds.is_complete());
        assert_eq!(ds.column(Variable::SepalWidth)[2], None);
    }
}
