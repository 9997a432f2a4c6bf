use eframe::egui::{self, Color32, RichText, Ui};

use petalist::color::legend_entries;
use petalist::session::{Command, PlotKind};

use crate::state::AppState;

const MENU_GREEN: Color32 = Color32::from_rgb(0x5E, 0x7F, 0x73);
const BUTTON_WIDTH: f32 = 230.0;

// ---------------------------------------------------------------------------
// Left side panel – greeting and analysis menu
// ---------------------------------------------------------------------------

/// Render the left menu panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.label(
        RichText::new(state.greeting.as_str())
            .heading()
            .strong()
            .color(MENU_GREEN),
    );
    ui.label(
        RichText::new(
            "Welcome to Petalist, the Iris dataset analysis program. \
             Please select one of the options below:",
        )
        .color(MENU_GREEN),
    );
    ui.separator();

    let busy = state.pending_plot.is_some() || state.staged.is_some();
    ui.add_enabled_ui(!busy, |ui: &mut Ui| {
        if menu_button(ui, " I .get descriptive summary") {
            state.run(Command::DescriptiveSummary);
        }

        ui.menu_button(menu_text("II .identify & handle outliers"), |ui: &mut Ui| {
            if ui.button("Get a summary of outliers").clicked() {
                state.run(Command::OutlierSummary);
                ui.close_menu();
            }
            if ui.button("Remove outliers from the dataset").clicked() {
                state.run(Command::RemoveOutliers);
                ui.close_menu();
            }
        });

        if menu_button(ui, "III .generate pair scatter plot") {
            state.request_plot(PlotKind::PairPlot);
        }
        if menu_button(ui, "IV .generate histograms") {
            state.request_plot(PlotKind::Histograms);
        }
        if menu_button(ui, "V .compute PCA") {
            state.request_plot(PlotKind::Pca);
        }
    });

    ui.separator();
    ui.strong("Species");
    for (label, color) in legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(label);
        });
    }
}

fn menu_text(text: &str) -> RichText {
    RichText::new(text).strong().color(Color32::WHITE)
}

fn menu_button(ui: &mut Ui, text: &str) -> bool {
    ui.add_sized(
        [BUTTON_WIDTH, 24.0],
        egui::Button::new(menu_text(text)).fill(MENU_GREEN),
    )
    .clicked()
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded, results in {}",
            state.session.base().len(),
            state.session.results().root().display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Iris data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset(&path);
    }
}
