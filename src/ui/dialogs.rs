use eframe::egui::{self, Align2, Context, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Modal questions
// ---------------------------------------------------------------------------

fn question_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

/// "Without the outliers?" yes / no before a plot runs.
pub fn variant_dialog(ctx: &Context, state: &mut AppState) {
    let Some(kind) = state.pending_plot else {
        return;
    };

    let mut answer = None;
    question_window("Choose dataset").show(ctx, |ui: &mut Ui| {
        ui.label(kind.variant_question());
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Yes").clicked() {
                answer = Some(true);
            }
            if ui.button("No").clicked() {
                answer = Some(false);
            }
        });
    });

    if let Some(cleaned) = answer {
        state.choose_variant(cleaned);
    }
}

/// OK / Cancel after a result file has been written.
pub fn open_dialog(ctx: &Context, state: &mut AppState) {
    let Some(staged) = &state.staged else {
        return;
    };

    let mut answer = None;
    question_window(staged.command.title()).show(ctx, |ui: &mut Ui| {
        ui.label(staged.command.open_prompt());
        ui.small(staged.path.display().to_string());
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("OK").clicked() {
                answer = Some(true);
            }
            if ui.button("Cancel").clicked() {
                answer = Some(false);
            }
        });
    });

    if let Some(open) = answer {
        state.resolve_staged(open);
    }
}
