use eframe::egui;

use crate::state::AppState;
use crate::ui::{dialogs, panels, viewer};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PetalistApp {
    pub state: AppState,
}

impl PetalistApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PetalistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for uri in self.state.stale_images.drain(..) {
            ctx.forget_image(&uri);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis menu ----
        egui::SidePanel::left("menu_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: opened result ----
        egui::CentralPanel::default().show(ctx, |ui| {
            viewer::result_view(ui, &self.state);
        });

        // ---- Modal questions ----
        dialogs::variant_dialog(ctx, &mut self.state);
        dialogs::open_dialog(ctx, &mut self.state);
    }
}
