use std::path::Path;

use petalist::data::loader;
use petalist::session::{Command, PlotKind, Preview, Session, StagedResult, Variant};

/// URI the image loaders use for a result PNG.
pub fn image_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Analyses live in the
/// session; this only tracks what is on screen.
pub struct AppState {
    pub session: Session,

    /// Greeting shown above the menu.
    pub greeting: String,

    /// Plot waiting for the original / cleaned answer.
    pub pending_plot: Option<PlotKind>,

    /// Written result waiting for the open / dismiss answer.
    pub staged: Option<StagedResult>,

    /// Result currently shown in the central viewer.
    pub opened: Option<StagedResult>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Image URIs whose cached textures are dropped before the next frame.
    /// Plots are rewritten under the same file name.
    pub stale_images: Vec<String>,
}

impl AppState {
    pub fn new(session: Session, greeting: String) -> Self {
        Self {
            session,
            greeting,
            pending_plot: None,
            staged: None,
            opened: None,
            status_message: None,
            stale_images: Vec::new(),
        }
    }

    /// Run a command and stage its result for the open prompt.
    pub fn run(&mut self, command: Command) {
        match self.session.run(command) {
            Ok(staged) => {
                self.status_message = Some(format!("Saved {}", staged.path.display()));
                self.staged = Some(staged);
            }
            Err(e) => {
                log::error!("{} failed: {e:#}", command.title());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ask which variant a plot should use.
    pub fn request_plot(&mut self, kind: PlotKind) {
        self.pending_plot = Some(kind);
    }

    /// Answer to the "without the outliers?" question.
    pub fn choose_variant(&mut self, cleaned: bool) {
        if let Some(kind) = self.pending_plot.take() {
            let variant = if cleaned { Variant::Cleaned } else { Variant::Original };
            self.run(kind.with(variant));
        }
    }

    /// Answer to the open prompt: `true` opens the staged result.
    pub fn resolve_staged(&mut self, open: bool) {
        if let Some(staged) = self.staged.take() {
            if open {
                log::info!("opening {}", staged.path.display());
                if matches!(staged.preview, Preview::Image) {
                    self.stale_images.push(image_uri(&staged.path));
                }
                self.opened = Some(staged);
            } else {
                log::debug!("user closed the prompt for {}", staged.path.display());
            }
        }
    }

    /// Replace the base dataset from a file.
    pub fn load_dataset(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} rows from {}", dataset.len(), path.display());
                self.session.replace_base(dataset);
                self.opened = None;
                self.staged = None;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petalist::data::model::IrisDataset;
    use petalist::export::ResultsDir;

    fn state(dir: &Path) -> AppState {
        let session = Session::new(
            loader::load_bundled().unwrap(),
            ResultsDir::new(dir.join("results")),
        );
        AppState::new(session, "Hello Ada,".to_string())
    }

    fn staged_image(path: &Path) -> StagedResult {
        StagedResult {
            command: Command::Histograms(Variant::Original),
            path: path.to_path_buf(),
            preview: Preview::Image,
        }
    }

    #[test]
    fn staged_result_opens_only_on_confirm() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());

        st.run(Command::OutlierSummary);
        assert!(st.staged.is_some());
        st.resolve_staged(false);
        assert!(st.staged.is_none());
        assert!(st.opened.is_none());

        st.run(Command::DescriptiveSummary);
        st.resolve_staged(true);
        assert_eq!(
            st.opened.as_ref().map(|s| s.command),
            Some(Command::DescriptiveSummary)
        );
    }

    #[test]
    fn failed_command_reports_and_stages_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        st.session.replace_base(IrisDataset::default());
        st.request_plot(PlotKind::Pca);
        st.choose_variant(false);
        assert!(st.pending_plot.is_none());
        assert!(st.staged.is_none());
        assert!(st.status_message.unwrap().starts_with("Error"));
    }

    #[test]
    fn bad_file_keeps_current_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        st.load_dataset(&dir.path().join("missing.csv"));
        assert_eq!(st.session.base().len(), 150);
        assert!(st.status_message.is_some());
    }

    #[test]
    fn reopened_plot_invalidates_cached_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());
        let path = dir.path().join("results").join("IV.histograms_original.png");

        st.staged = Some(staged_image(&path));
        st.resolve_staged(true);
        st.staged = Some(staged_image(&path));
        st.resolve_staged(true);

        let uri = image_uri(&path);
        assert_eq!(st.stale_images, vec![uri.clone(), uri]);
    }

    #[test]
    fn dismissed_or_text_results_leave_image_cache_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());

        st.staged = Some(staged_image(&dir.path().join("plot.png")));
        st.resolve_staged(false);
        st.run(Command::OutlierSummary);
        st.resolve_staged(true);
        assert!(st.stale_images.is_empty());
    }

    #[test]
    fn cleaned_answer_runs_the_cleaned_variant() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state(dir.path());

        st.request_plot(PlotKind::Pca);
        st.choose_variant(true);
        let staged = st.staged.as_ref().unwrap();
        assert_eq!(staged.command, Command::Pca(Variant::Cleaned));
        assert!(staged.path.ends_with("V.PCA_cleaned.png"));

        st.resolve_staged(false);
        st.request_plot(PlotKind::Histograms);
        st.choose_variant(false);
        assert_eq!(
            st.staged.as_ref().map(|s| s.command),
            Some(Command::Histograms(Variant::Original))
        );
    }
}
