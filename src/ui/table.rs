use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::radiometry::BANDS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Band flux table (side panel)
// ---------------------------------------------------------------------------

/// Per-band fluxes of the selected object.
pub fn band_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Photometry");
    ui.separator();

    let controller = &state.controller;
    let Some(entry) = controller
        .params()
        .selection
        .as_deref()
        .and_then(|name| controller.catalog().get(name))
    else {
        ui.label("No object selected.");
        return;
    };

    ui.strong(&entry.name);

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Band");
            });
            header.col(|ui| {
                ui.strong("λ (µm)");
            });
            header.col(|ui| {
                ui.strong("mJy");
            });
            header.col(|ui| {
                ui.strong("νFν (cgs)");
            });
        })
        .body(|mut body| {
            for (i, band) in BANDS.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(band.name);
                    });
                    row.col(|ui| {
                        ui.label(format!("{}", band.wavelength_um));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", entry.raw_mjy[i]));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3e}", entry.flux_cgs[i]));
                    });
                });
            }
        });
}
