use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use petalist::analysis::pca::ReducedDataset;
use petalist::color::species_color32;
use petalist::data::model::Species;

// ---------------------------------------------------------------------------
// PCA scatter (central panel)
// ---------------------------------------------------------------------------

/// Interactive version of the saved PCA figure.
pub fn pca_plot(ui: &mut Ui, reduced: &ReducedDataset) {
    let [r1, r2] = reduced.explained_variance_ratio;
    ui.label(format!(
        "Explained variance: PC1 {:.1}%, PC2 {:.1}%",
        r1 * 100.0,
        r2 * 100.0
    ));

    Plot::new("pca_plot")
        .legend(Legend::default())
        .x_axis_label("Principal Component #1")
        .y_axis_label("Principal Component #2")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for species in Species::ALL {
                let points: PlotPoints = reduced
                    .rows
                    .iter()
                    .filter(|r| r.species == species)
                    .map(|r| [r.pc1, r.pc2])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(species.as_str())
                        .color(species_color32(species))
                        .radius(3.0),
                );
            }
        });
}
