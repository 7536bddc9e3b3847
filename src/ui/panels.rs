use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::trough_color;
use crate::events::UiEvent;
use crate::fit::{ComponentId, INTENSITY_STEP};
use crate::state::AppState;

/// Dropdown placeholder for "no object selected".
pub const NO_OBJECT: &str = "-- Choose an Object --";

// ---------------------------------------------------------------------------
// Toolbar – object selection and model parameters
// ---------------------------------------------------------------------------

/// Render the parameter toolbar above the plot.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        object_selector(ui, state);
        ui.separator();

        egui::Grid::new("parameters")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui: &mut Ui| {
                ui.label("");
                ui.strong(ComponentId::CentralObject.to_string());
                let mut disc = state.disc_enabled;
                if ui.checkbox(&mut disc, "Add Second Blackbody").changed() {
                    state.disc_enabled = disc;
                    state.events.push(UiEvent::DiscToggled(disc));
                }
                ui.end_row();

                ui.label("Temperature (Kelvin)");
                for component in ComponentId::ALL {
                    temperature_entry(ui, state, component);
                }
                ui.end_row();

                ui.label("Intensity");
                for component in ComponentId::ALL {
                    intensity_slider(ui, state, component);
                }
                ui.end_row();
            });

        ui.separator();

        ui.vertical(|ui: &mut Ui| {
            if ui.button("Clear Data").clicked() {
                state.events.push(UiEvent::SelectionCleared);
            }
            if ui.button("Update Plot").clicked() {
                state.request_update();
            }
        });
    });
}

fn object_selector(ui: &mut Ui, state: &mut AppState) {
    ui.vertical(|ui: &mut Ui| {
        ui.label("Data Selection");
        let current = state
            .controller
            .params()
            .selection
            .clone()
            .unwrap_or_else(|| NO_OBJECT.to_string());

        let mut picked = None;
        egui::ComboBox::from_id_salt("object_chosen")
            .selected_text(&current)
            .width(170.0)
            .show_ui(ui, |ui: &mut Ui| {
                for name in state.controller.catalog().object_names() {
                    if ui.selectable_label(current == name, name).clicked() {
                        picked = Some(name.to_string());
                    }
                }
            });

        if let Some(name) = picked {
            state.events.push(UiEvent::ObjectSelected(name));
        }
    });
}

fn temperature_entry(ui: &mut Ui, state: &mut AppState, component: ComponentId) {
    let editable = component == ComponentId::CentralObject || state.controller.disc_inputs_editable();
    let idx = AppState::index(component);

    let response = ui.add_enabled(
        editable,
        egui::TextEdit::singleline(&mut state.temperature_text[idx]).desired_width(110.0),
    );
    // Enter also surrenders focus.
    if response.lost_focus() {
        state.commit_temperature(component);
    }
}

fn intensity_slider(ui: &mut Ui, state: &mut AppState, component: ComponentId) {
    let editable = component == ComponentId::CentralObject || state.controller.disc_inputs_editable();
    let idx = AppState::index(component);

    ui.scope(|ui: &mut Ui| {
        ui.visuals_mut().selection.bg_fill = trough_color(component, editable);
        let slider = egui::Slider::new(&mut state.intensity[idx], component.intensity_range())
            .step_by(INTENSITY_STEP)
            .show_value(false)
            .trailing_fill(true);
        if ui.add_enabled(editable, slider).changed() {
            state.events.push(UiEvent::IntensityChanged {
                component,
                log_scale: state.intensity[idx],
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open catalog…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Reset Axes").clicked() {
                state.controller.surface_mut().request_bounds_reset();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} objects in {}",
            state.controller.catalog().len(),
            state.catalog_path.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open flux catalog")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_catalog(&path) {
            Ok(catalog) => {
                log::info!("Loaded {} objects from {}", catalog.len(), path.display());
                state.set_catalog(catalog, path);
            }
            Err(e) => {
                log::error!("Failed to load catalog: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
