use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct YsoPlotterApp {
    pub state: AppState,
}

impl YsoPlotterApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for YsoPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Second top panel: selection and model parameters ----
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            panels::toolbar(ui, &mut self.state);
        });

        // Widgets queued events above; apply them before the plot reads the scene.
        if self.state.process_events() {
            ctx.request_repaint();
        }

        // ---- Right side panel: band fluxes ----
        egui::SidePanel::right("band_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::band_table(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::model_plot(ui, &mut self.state);
        });
    }
}
