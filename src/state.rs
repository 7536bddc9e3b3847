use std::path::PathBuf;

use crate::controller::PlotController;
use crate::data::model::Catalog;
use crate::events::{EventQueue, UiEvent};
use crate::fit::{parse_temperature, ComponentId};
use crate::radiometry::WavelengthGrid;
use crate::surface::PlotScene;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Model parameters, curves and the retained plot scene.
    pub controller: PlotController<PlotScene>,

    /// Events queued by widgets this frame.
    pub events: EventQueue,

    /// Raw text of the two temperature entry boxes.
    pub temperature_text: [String; 2],

    /// Slider positions, mirrored into the controller on change.
    pub intensity: [f64; 2],

    /// Checkbox mirror of the disc switch.
    pub disc_enabled: bool,

    /// Catalog currently shown.
    pub catalog_path: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and draw the initial central-object curve.
    pub fn new(catalog: Catalog, catalog_path: PathBuf, grid: WavelengthGrid) -> Self {
        let controller = PlotController::new(catalog, grid, PlotScene::default());
        let mut state = Self {
            temperature_text: ComponentId::ALL.map(|c| format!("{}", c.default_temperature())),
            intensity: ComponentId::ALL.map(|c| controller.params().component(c).intensity),
            disc_enabled: controller.params().disc_enabled,
            controller,
            events: EventQueue::default(),
            catalog_path,
            status_message: None,
        };
        state.events.push(UiEvent::DiscToggled(state.disc_enabled));
        state.process_events();
        state
    }

    pub fn index(component: ComponentId) -> usize {
        match component {
            ComponentId::CentralObject => 0,
            ComponentId::Disc => 1,
        }
    }

    fn parse_entry(&mut self, component: ComponentId) -> Option<f64> {
        let text = &self.temperature_text[Self::index(component)];
        match parse_temperature(component, text) {
            Ok(kelvin) => Some(kelvin),
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(format!("Error: {e}"));
                None
            }
        }
    }

    /// Validate a temperature box and queue it if it differs from the
    /// model. Invalid text only sets the status line.
    pub fn commit_temperature(&mut self, component: ComponentId) -> bool {
        let Some(kelvin) = self.parse_entry(component) else {
            return false;
        };
        if self.controller.params().component(component).temperature != kelvin {
            self.events
                .push(UiEvent::TemperatureCommitted { component, kelvin });
        }
        true
    }

    /// "Update Plot": re-read both entry boxes, then refresh once. Nothing
    /// is queued unless both parse.
    pub fn request_update(&mut self) {
        let central = self.parse_entry(ComponentId::CentralObject);
        let disc = self.parse_entry(ComponentId::Disc);
        if central.is_some() && disc.is_some() {
            self.events.push(UiEvent::UpdatePlot);
        }
    }

    /// Copy every entry box that parses into the model without refreshing.
    /// Boxes holding invalid text keep the last good temperature.
    fn sync_temperatures(&mut self) {
        for component in ComponentId::ALL {
            let text = &self.temperature_text[Self::index(component)];
            let Ok(kelvin) = parse_temperature(component, text) else {
                continue;
            };
            if self.controller.params().component(component).temperature != kelvin {
                log::debug!("Syncing {component} temperature to {kelvin} K");
                self.controller.stage_temperature(component, kelvin);
            }
        }
    }

    /// Hand queued events to the controller. Every refresh sees the
    /// current entry boxes. Returns true if anything ran.
    pub fn process_events(&mut self) -> bool {
        if self.events.is_empty() {
            return false;
        }
        self.sync_temperatures();
        let errors = self.controller.process_events(&mut self.events);
        match errors.last() {
            Some(e) => self.status_message = Some(format!("Error: {e}")),
            None => {
                if self
                    .status_message
                    .as_deref()
                    .is_some_and(|m| m.starts_with("Error:"))
                {
                    self.status_message = None;
                }
            }
        }
        true
    }

    /// Ingest a newly loaded catalog.
    pub fn set_catalog(&mut self, catalog: Catalog, path: PathBuf) {
        self.catalog_path = path;
        if let Err(e) = self.controller.replace_catalog(catalog) {
            self.status_message = Some(format!("Error: {e}"));
        } else {
            self.status_message = None;
        }
    }
}
