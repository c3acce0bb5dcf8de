use anyhow::{anyhow, Result};
use eframe::egui;

use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ReportViewerApp {
    pub state: ViewerState,
}

impl ReportViewerApp {
    pub fn new(state: ViewerState) -> Self {
        Self { state }
    }
}

impl eframe::App for ReportViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: one tab per figure ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: report outcomes ----
        egui::SidePanel::left("report_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::figure_view(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(state: ViewerState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 560.0])
            .with_min_inner_size([600.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Column generation reports",
        options,
        Box::new(move |_cc| Ok(Box::new(ReportViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer: {e}"))
}
