use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{IrisDataset, Species};

/// The Iris table shipped inside the binary.
const BUNDLED_IRIS: &str = include_str!("iris.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled Iris dataset.
pub fn load_bundled() -> Result<IrisDataset> {
    read_csv(BUNDLED_IRIS.as_bytes()).context("parsing bundled iris.csv")
}

/// Load an Iris-shaped dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header `sepal_length,sepal_width,petal_length,petal_width,species`
/// * `.json` – `[{ "sepal_length": 5.1, ..., "species": "setosa" }, ...]`
pub fn load_file(path: &Path) -> Result<IrisDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Record layout shared by CSV and JSON
// ---------------------------------------------------------------------------

/// One row as it appears on disk. Empty CSV cells and JSON `null` are
/// missing measurements.
#[derive(Debug, Deserialize)]
struct IrisRecord {
    sepal_length: Option<f64>,
    sepal_width: Option<f64>,
    petal_length: Option<f64>,
    petal_width: Option<f64>,
    species: String,
}

impl IrisRecord {
    fn into_parts(self, row: usize) -> Result<([Option<f64>; 4], Species)> {
        let species = self
            .species
            .parse::<Species>()
            .with_context(|| format!("Row {row}: invalid species"))?;
        let measurements = [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ];
        if let Some(v) = measurements.iter().flatten().find(|v| !v.is_finite() || **v < 0.0) {
            bail!("Row {row}: measurement {v} is not a non-negative number");
        }
        Ok((measurements, species))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv<R: Read>(source: R) -> Result<IrisDataset> {
    let mut reader = csv::Reader::from_reader(source);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<IrisRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record.into_parts(row_no)?);
    }

    Ok(IrisDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` shape.
fn parse_json(text: &str) -> Result<IrisDataset> {
    let rows: Vec<IrisRecord> = serde_json::from_str(text).context("parsing JSON")?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, rec)| rec.into_parts(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(IrisDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RowId, Variable};

    #[test]
    fn bundled_dataset_has_fifty_rows_per_species() {
        let ds = load_bundled().unwrap();
        assert_eq!(ds.len(), 150);
        for (species, rows) in ds.partition() {
            assert_eq!(rows.len(), 50, "{species}");
        }
        assert!(ds.is_complete());
        let first = &ds.rows()[0];
        assert_eq!(first.id, RowId(0));
        assert_eq!(first.species, Species::Setosa);
        assert_eq!(first.value(Variable::SepalLength), Some(5.1));
        assert_eq!(first.value(Variable::PetalWidth), Some(0.2));
    }

    #[test]
    fn csv_empty_cell_is_missing() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                    5.1,,1.4,0.2,setosa\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.rows()[0].value(Variable::SepalWidth), None);
    }

    #[test]
    fn csv_unknown_species_is_rejected() {
        let text = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                    5.1,3.5,1.4,0.2,tulip\n";
        assert!(read_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn json_records_with_null() {
        let text = r#"[
            {"sepal_length": 6.3, "sepal_width": 3.3, "petal_length": 6.0, "petal_width": 2.5, "species": "virginica"},
            {"sepal_length": null, "sepal_width": 2.7, "petal_length": 5.1, "petal_width": 1.9, "species": "virginica"}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[1].value(Variable::SepalLength), None);
        assert_eq!(ds.rows()[1].id, RowId(1));
    }

    #[test]
    fn negative_measurement_is_rejected() {
        let text = r#"[{"sepal_length": -1.0, "sepal_width": 2.7, "petal_length": 5.1, "petal_width": 1.9, "species": "setosa"}]"#;
        assert!(parse_json(text).is_err());
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("iris.parquet")).unwrap_err();
        assert!(err.to_string().contains(".parquet"));
    }
}
