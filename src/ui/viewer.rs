use eframe::egui::{self, ScrollArea, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use petalist::data::model::{IrisDataset, Variable};
use petalist::session::Preview;

use crate::state::{image_uri, AppState};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – the opened result
// ---------------------------------------------------------------------------

pub fn result_view(ui: &mut Ui, state: &AppState) {
    let Some(opened) = &state.opened else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Pick an analysis from the menu on the left");
        });
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.heading(opened.command.title());
        ui.label(opened.path.display().to_string());
    });
    ui.separator();

    match &opened.preview {
        Preview::Text(text) => {
            ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.add(egui::Label::new(egui::RichText::new(text).text_style(TextStyle::Monospace)).extend());
                });
        }
        Preview::Table(dataset) => dataset_table(ui, dataset),
        Preview::Image => {
            let uri = image_uri(&opened.path);
            ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.add(egui::Image::new(uri).fit_to_original_size(1.0));
                });
        }
        Preview::Scatter(reduced) => plot::pca_plot(ui, reduced),
    }
}

fn dataset_table(ui: &mut Ui, dataset: &IrisDataset) {
    let rows = dataset.rows();
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .columns(Column::auto().at_least(90.0), Variable::ALL.len() + 1)
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("row_id");
            });
            for var in Variable::ALL {
                header.col(|ui: &mut Ui| {
                    ui.strong(var.column_name());
                });
            }
            header.col(|ui: &mut Ui| {
                ui.strong("species");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let obs = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(obs.id.to_string());
                });
                for var in Variable::ALL {
                    row.col(|ui: &mut Ui| {
                        ui.label(obs.value(var).map(|v| v.to_string()).unwrap_or_default());
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(obs.species.as_str());
                });
            });
        });
}
