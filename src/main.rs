mod app;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::PetalistApp;
use petalist::config::{Cli, Config};
use petalist::data::loader;
use petalist::export::ResultsDir;
use petalist::session::Session;
use state::AppState;

fn main() -> Result<()> {
    // A missing --username exits here with the usage text.
    let config = Config::from(Cli::parse());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = match &config.data {
        Some(path) => loader::load_file(path)
            .with_context(|| format!("loading dataset from {}", path.display()))?,
        None => loader::load_bundled()?,
    };
    log::info!("Iris dataset loaded: {} rows", dataset.len());

    let session = Session::new(dataset, ResultsDir::new(&config.results_dir));

    if config.batch {
        for staged in session.run_all()? {
            println!("{}", staged.path.display());
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(session, config.greeting());
    eframe::run_native(
        "PETALIST || Iris Dataset Analysis",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the saved PNGs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PetalistApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the window: {e}"))
}
