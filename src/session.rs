//! Menu commands. `Session::run` computes a result, writes its file and
//! hands back a [`StagedResult`]; opening it is a separate caller step.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use log::info;

use crate::analysis::outliers::{find_outliers, remove_outliers};
use crate::analysis::pca::{reduce_dimensions, ReducedDataset};
use crate::analysis::summary::descriptive_summary;
use crate::data::model::IrisDataset;
use crate::export::ResultsDir;
use crate::render;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Which table a plot is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Original,
    Cleaned,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Original, Variant::Cleaned];

    fn suffix(self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::Cleaned => "cleaned",
        }
    }
}

/// Plot families that offer the original / cleaned choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    Histograms,
    PairPlot,
    Pca,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [PlotKind::PairPlot, PlotKind::Histograms, PlotKind::Pca];

    /// Yes/no question asked before running the plot.
    pub fn variant_question(self) -> &'static str {
        match self {
            PlotKind::Histograms => "Would you like to generate the histogram without the outliers?",
            PlotKind::PairPlot => {
                "Would you like to generate the pair scatter plot without the outliers?"
            }
            PlotKind::Pca => "Would you like to perform the PCA without the outliers?",
        }
    }

    pub fn with(self, variant: Variant) -> Command {
        match self {
            PlotKind::Histograms => Command::Histograms(variant),
            PlotKind::PairPlot => Command::PairPlot(variant),
            PlotKind::Pca => Command::Pca(variant),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    DescriptiveSummary,
    OutlierSummary,
    RemoveOutliers,
    Histograms(Variant),
    PairPlot(Variant),
    Pca(Variant),
}

impl Command {
    /// Every command once, plots in both variants.
    pub fn all() -> Vec<Command> {
        let mut all = vec![
            Command::DescriptiveSummary,
            Command::OutlierSummary,
            Command::RemoveOutliers,
        ];
        for kind in PlotKind::ALL {
            all.extend(Variant::ALL.iter().map(|&v| kind.with(v)));
        }
        all
    }

    pub fn file_name(self) -> String {
        match self {
            Command::DescriptiveSummary => "I.variables_summary.txt".to_string(),
            Command::OutlierSummary => "II.outliers_summary.txt".to_string(),
            Command::RemoveOutliers => "II.dataframe_cleaned.csv".to_string(),
            Command::PairPlot(v) => format!("III.pairplot_{}.png", v.suffix()),
            Command::Histograms(v) => format!("IV.histograms_{}.png", v.suffix()),
            Command::Pca(v) => format!("V.PCA_{}.png", v.suffix()),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Command::DescriptiveSummary => "Descriptive summary",
            Command::OutlierSummary => "Outlier summary",
            Command::RemoveOutliers => "Outliers cleanup",
            Command::Histograms(_) => "Generate histograms",
            Command::PairPlot(_) => "Generate pair scatter plot",
            Command::Pca(_) => "Principal Component Analysis",
        }
    }

    /// Confirmation text shown once the file is written.
    pub fn open_prompt(self) -> &'static str {
        match self {
            Command::DescriptiveSummary => {
                "A text file with a descriptive summary of each variable was saved in the results directory. Click OK to open the file."
            }
            Command::OutlierSummary => {
                "A text file with an outlier summary by species was saved in the results directory. Click OK to open the file."
            }
            Command::RemoveOutliers => {
                "A CSV file containing the Iris dataset without outliers was saved in the results directory. Click OK to open the file."
            }
            Command::Histograms(_) => {
                "A histogram of each variable was plotted and saved in the results directory. Click OK to open the file."
            }
            Command::PairPlot(_) => {
                "A scatter plot of each pair of variables was saved in the results directory. Click OK to open the file."
            }
            Command::Pca(_) => {
                "A scatter plot of the computed PCA was saved in the results directory. Click OK to open the file."
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

// ---------------------------------------------------------------------------
// Staged results
// ---------------------------------------------------------------------------

/// What the viewer shows when a staged result is opened.
#[derive(Debug, Clone)]
pub enum Preview {
    Text(String),
    Table(IrisDataset),
    Image,
    Scatter(ReducedDataset),
}

/// A written result waiting for the open / dismiss decision.
#[derive(Debug, Clone)]
pub struct StagedResult {
    pub command: Command,
    pub path: PathBuf,
    pub preview: Preview,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The base dataset and the results directory. Derived tables are rebuilt
/// for every command.
#[derive(Debug, Clone)]
pub struct Session {
    base: IrisDataset,
    results: ResultsDir,
}

impl Session {
    pub fn new(base: IrisDataset, results: ResultsDir) -> Self {
        Session { base, results }
    }

    pub fn base(&self) -> &IrisDataset {
        &self.base
    }

    pub fn results(&self) -> &ResultsDir {
        &self.results
    }

    pub fn replace_base(&mut self, base: IrisDataset) {
        self.base = base;
    }

    fn dataset(&self, variant: Variant) -> IrisDataset {
        match variant {
            Variant::Original => self.base.clone(),
            Variant::Cleaned => remove_outliers(&self.base).cleaned,
        }
    }

    /// Compute `command`, write its file and stage the result.
    pub fn run(&self, command: Command) -> Result<StagedResult> {
        info!("running {:?}", command);
        let file_name = command.file_name();

        let (path, preview) = match command {
            Command::DescriptiveSummary => {
                let text = descriptive_summary(&self.base);
                (self.results.save_text(&file_name, &text)?, Preview::Text(text))
            }
            Command::OutlierSummary => {
                let report = find_outliers(&self.base);
                info!("{} flagged cells", report.flagged_cells());
                let text = report.to_string();
                (self.results.save_text(&file_name, &text)?, Preview::Text(text))
            }
            Command::RemoveOutliers => {
                let cleanup = remove_outliers(&self.base);
                info!(
                    "removed {} of {} rows",
                    cleanup.removed.len(),
                    self.base.len()
                );
                let path = self.results.save_csv(&file_name, &cleanup.cleaned)?;
                (path, Preview::Table(cleanup.cleaned))
            }
            Command::Histograms(variant) => {
                let data = self.dataset(variant);
                let path = self.results.prepare(&file_name)?;
                render::draw_histograms(&data, &path)?;
                info!("wrote {}", path.display());
                (path, Preview::Image)
            }
            Command::PairPlot(variant) => {
                let data = self.dataset(variant);
                let path = self.results.prepare(&file_name)?;
                render::draw_pair_grid(&data, &path)?;
                info!("wrote {}", path.display());
                (path, Preview::Image)
            }
            Command::Pca(variant) => {
                let data = self.dataset(variant);
                let reduced = reduce_dimensions(&data)?;
                info!(
                    "PCA on {} rows, explained variance {:.3} + {:.3}",
                    reduced.len(),
                    reduced.explained_variance_ratio[0],
                    reduced.explained_variance_ratio[1]
                );
                let path = self.results.prepare(&file_name)?;
                render::draw_pca_scatter(&reduced, &path)?;
                info!("wrote {}", path.display());
                (path, Preview::Scatter(reduced))
            }
        };

        Ok(StagedResult {
            command,
            path,
            preview,
        })
    }

    /// Run every command, stopping at the first failure.
    pub fn run_all(&self) -> Result<Vec<StagedResult>> {
        Command::all().into_iter().map(|c| self.run(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_distinguish_variants() {
        assert_eq!(Command::Pca(Variant::Original).file_name(), "V.PCA_original.png");
        assert_eq!(Command::Pca(Variant::Cleaned).file_name(), "V.PCA_cleaned.png");
        assert_eq!(
            Command::Histograms(Variant::Cleaned).file_name(),
            "IV.histograms_cleaned.png"
        );
        assert_eq!(
            Command::PairPlot(Variant::Original).file_name(),
            "III.pairplot_original.png"
        );
    }

    #[test]
    fn all_commands_have_unique_files() {
        let all = Command::all();
        assert_eq!(all.len(), 9);
        let mut names: Vec<String> = all.iter().map(|c| c.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn plot_kind_maps_to_command() {
        assert_eq!(
            PlotKind::Histograms.with(Variant::Cleaned),
            Command::Histograms(Variant::Cleaned)
        );
    }
}
