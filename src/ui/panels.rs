use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – report summary
// ---------------------------------------------------------------------------

/// Render the list of reports and what happened to each.
pub fn side_panel(ui: &mut Ui, state: &ViewerState) {
    ui.heading("Reports");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (kind, summary) in &state.summaries {
                ui.strong(kind.name());
                ui.label(RichText::new(summary).small());
                ui.add_space(4.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render one tab per produced figure.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let mut clicked = None;
        for (i, entry) in state.entries.iter().enumerate() {
            if ui
                .selectable_label(state.selected == i, entry.kind.name())
                .on_hover_text(entry.path.display().to_string())
                .clicked()
            {
                clicked = Some(i);
            }
        }
        if let Some(i) = clicked {
            state.select(i);
        }

        ui.separator();

        if let Some(entry) = state.current() {
            ui.label(entry.figure.title.as_str());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
