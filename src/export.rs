use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::IrisDataset;

// ---------------------------------------------------------------------------
// Results directory
// ---------------------------------------------------------------------------

/// Where result files land. The directory is created on first write.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    root: PathBuf,
}

impl ResultsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ResultsDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path for `file_name`, creating the directory if needed.
    pub fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating results directory {}", self.root.display()))?;
        Ok(self.root.join(file_name))
    }

    pub fn save_text(&self, file_name: &str, text: &str) -> Result<PathBuf> {
        let path = self.prepare(file_name)?;
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    pub fn save_csv(&self, file_name: &str, dataset: &IrisDataset) -> Result<PathBuf> {
        let path = self.prepare(file_name)?;
        write_csv(&path, dataset)?;
        log::info!("wrote {} ({} rows)", path.display(), dataset.len());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    row_id: usize,
    sepal_length: Option<f64>,
    sepal_width: Option<f64>,
    petal_length: Option<f64>,
    petal_width: Option<f64>,
    species: &'a str,
}

/// Header row plus one line per observation; missing cells are empty.
fn write_csv(path: &Path, dataset: &IrisDataset) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in dataset.rows() {
        let [sepal_length, sepal_width, petal_length, petal_width] = row.measurements;
        writer
            .serialize(CsvRow {
                row_id: row.id.0,
                sepal_length,
                sepal_width,
                petal_length,
                petal_width,
                species: row.species.as_str(),
            })
            .with_context(|| format!("writing row {}", row.id))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}
