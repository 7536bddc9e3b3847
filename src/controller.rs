//! Plot state controller.
//!
//! Owns the model parameters and the four plotted artifacts, and pushes
//! minimal updates to a [`PlotSurface`] whenever an input changes.

use thiserror::Error;

use crate::data::model::Catalog;
use crate::events::{EventSource, UiEvent};
use crate::fit::{curve_max, ComponentId, FitParameters, ModelCurves};
use crate::radiometry::{band_wavelengths, WavelengthGrid};
use crate::surface::{CurveId, PlotSurface, Series};

/// Fixed lower y bound, erg s⁻¹ cm⁻².
pub const Y_LOWER_BOUND: f64 = 1e-15;
/// Upper y bound before the first refresh.
pub const INITIAL_Y_UPPER: f64 = 1.0;
/// Upper y bound is this many times the tallest visible value.
pub const Y_HEADROOM: f64 = 5.0;
/// Fixed x range, micrometres.
pub const X_LIMITS: (f64, f64) = (0.1, 500.0);

#[derive(Debug, Error, PartialEq)]
pub enum PlotError {
    #[error("object '{0}' not found in catalog")]
    ObjectNotFound(String),
}

// ---------------------------------------------------------------------------
// Curve presence
// ---------------------------------------------------------------------------

/// Lifecycle of one plotted artifact. Never returns to `Absent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CurvePresence {
    #[default]
    Absent,
    Empty,
    WithData(Series),
}

impl CurvePresence {
    pub fn series(&self) -> Option<&Series> {
        match self {
            CurvePresence::WithData(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CurvePresence::Absent)
    }
}

/// Presence of every [`CurveId`].
#[derive(Debug, Clone, Default)]
pub struct CurveSet {
    slots: [CurvePresence; 4],
}

impl CurveSet {
    pub fn presence(&self, id: CurveId) -> &CurvePresence {
        &self.slots[id.index()]
    }

    /// Move curve `id` to `data`, creating it on first non-empty data and
    /// skipping the surface when nothing changes.
    pub fn show<S: PlotSurface>(&mut self, id: CurveId, data: Series, surface: &mut S) {
        let slot = &mut self.slots[id.index()];
        let next = match (&*slot, data.is_empty()) {
            (CurvePresence::Absent, true) | (CurvePresence::Empty, true) => return,
            (CurvePresence::WithData(current), false) if *current == data => return,
            (CurvePresence::Absent, false) => {
                surface.create_curve(id, &data);
                CurvePresence::WithData(data)
            }
            (_, true) => {
                surface.update_curve(id, &data);
                CurvePresence::Empty
            }
            (_, false) => {
                surface.update_curve(id, &data);
                CurvePresence::WithData(data)
            }
        };
        *slot = next;
    }

    pub fn hide<S: PlotSurface>(&mut self, id: CurveId, surface: &mut S) {
        self.show(id, Series::empty(), surface);
    }
}

/// Current y-axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub lower: f64,
    pub upper: f64,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self {
            lower: Y_LOWER_BOUND,
            upper: INITIAL_Y_UPPER,
        }
    }
}

// ---------------------------------------------------------------------------
// PlotController
// ---------------------------------------------------------------------------

pub struct PlotController<S: PlotSurface> {
    grid: WavelengthGrid,
    catalog: Catalog,
    params: FitParameters,
    curves: CurveSet,
    limits: AxisLimits,
    surface: S,
}

impl<S: PlotSurface> PlotController<S> {
    /// Fresh plot state: default parameters, every curve absent.
    pub fn new(catalog: Catalog, grid: WavelengthGrid, surface: S) -> Self {
        Self {
            grid,
            catalog,
            params: FitParameters::default(),
            curves: CurveSet::default(),
            limits: AxisLimits::default(),
            surface,
        }
    }

    pub fn params(&self) -> &FitParameters {
        &self.params
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &WavelengthGrid {
        &self.grid
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn limits(&self) -> AxisLimits {
        self.limits
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Whether the disc entry box and slider accept input.
    pub fn disc_inputs_editable(&self) -> bool {
        self.params.disc_enabled
    }

    /// Sync the photometry scatter with the selection. Raises the upper y
    /// bound to fit the object's brightest band, never lowers it.
    pub fn refresh_data_points(&mut self) -> Result<(), PlotError> {
        let Some(name) = self.params.selection.as_deref() else {
            self.curves.hide(CurveId::DataPoints, &mut self.surface);
            return Ok(());
        };

        let Some(entry) = self.catalog.get(name) else {
            let missing = name.to_string();
            self.curves.hide(CurveId::DataPoints, &mut self.surface);
            return Err(PlotError::ObjectNotFound(missing));
        };

        let series = Series::new(band_wavelengths().to_vec(), entry.flux_cgs.to_vec());
        let needed = Y_HEADROOM * entry.peak_flux_cgs();
        self.curves.show(CurveId::DataPoints, series, &mut self.surface);

        if needed > self.limits.upper {
            log::debug!("Raising y upper bound to {needed:e} for '{}'", entry.name);
            self.limits.upper = needed;
            self.surface.set_y_limits(self.limits.lower, self.limits.upper);
        }
        Ok(())
    }

    /// Recompute both components, update the model curves, fit the y range
    /// to the visible model, then refresh the photometry and redraw.
    pub fn refresh_model_curves(&mut self) -> Result<(), PlotError> {
        let model = ModelCurves::evaluate(&self.grid, &self.params);
        let x = self.grid.as_slice().to_vec();

        let peak = if self.params.disc_enabled {
            let peak = curve_max(&model.combined);
            self.curves.show(
                CurveId::CentralObject,
                Series::new(x.clone(), model.central),
                &mut self.surface,
            );
            self.curves.show(
                CurveId::Disc,
                Series::new(x.clone(), model.disc),
                &mut self.surface,
            );
            self.curves.show(
                CurveId::Combined,
                Series::new(x, model.combined),
                &mut self.surface,
            );
            peak
        } else {
            let peak = curve_max(&model.central);
            self.curves.show(
                CurveId::CentralObject,
                Series::new(x, model.central),
                &mut self.surface,
            );
            self.curves.hide(CurveId::Disc, &mut self.surface);
            self.curves.hide(CurveId::Combined, &mut self.surface);
            peak
        };

        // A model that underflowed everywhere still needs a usable log range.
        self.limits.upper = (Y_HEADROOM * peak).max(self.limits.lower * 10.0);
        self.surface.set_y_limits(self.limits.lower, self.limits.upper);

        let data = self.refresh_data_points();
        self.surface.redraw();
        data
    }

    /// Switch the disc component on or off and refresh.
    pub fn toggle_disc_component(&mut self, enabled: bool) -> Result<(), PlotError> {
        self.params.disc_enabled = enabled;
        self.refresh_model_curves()
    }

    /// Back to "no object selected"; the scatter empties on refresh.
    pub fn clear_selection(&mut self) -> Result<(), PlotError> {
        self.params.selection = None;
        self.refresh_model_curves()
    }

    /// Select a catalog object. Unknown names leave the state untouched.
    pub fn select_object(&mut self, name: &str) -> Result<(), PlotError> {
        if self.catalog.get(name).is_none() {
            return Err(PlotError::ObjectNotFound(name.to_string()));
        }
        self.params.selection = Some(name.to_string());
        self.refresh_model_curves()
    }

    pub fn set_temperature(&mut self, component: ComponentId, kelvin: f64) -> Result<(), PlotError> {
        self.params.set_temperature(component, kelvin);
        self.refresh_model_curves()
    }

    /// Set a temperature without refreshing. The next refresh draws it.
    pub fn stage_temperature(&mut self, component: ComponentId, kelvin: f64) {
        self.params.set_temperature(component, kelvin);
    }

    pub fn set_intensity(&mut self, component: ComponentId, log_scale: f64) -> Result<(), PlotError> {
        self.params.set_intensity(component, log_scale);
        self.refresh_model_curves()
    }

    /// Swap in a new catalog and drop the selection.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Result<(), PlotError> {
        log::info!("Catalog replaced: {} objects", catalog.len());
        self.catalog = catalog;
        self.clear_selection()
    }

    pub fn handle_event(&mut self, event: UiEvent) -> Result<(), PlotError> {
        log::debug!("Handling {event:?}");
        match event {
            UiEvent::ObjectSelected(name) => self.select_object(&name),
            UiEvent::SelectionCleared => self.clear_selection(),
            UiEvent::TemperatureCommitted { component, kelvin } => {
                self.set_temperature(component, kelvin)
            }
            UiEvent::IntensityChanged {
                component,
                log_scale,
            } => self.set_intensity(component, log_scale),
            UiEvent::DiscToggled(enabled) => self.toggle_disc_component(enabled),
            UiEvent::UpdatePlot => self.refresh_model_curves(),
        }
    }

    /// Drain `source`, handling each event to completion in order.
    /// Failures are logged and returned; later events still run.
    pub fn process_events<E: EventSource>(&mut self, source: &mut E) -> Vec<PlotError> {
        let mut errors = Vec::new();
        while let Some(event) = source.next_event() {
            if let Err(e) = self.handle_event(event) {
                log::error!("{e}");
                errors.push(e);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventQueue;
    use crate::radiometry::{blackbody_curve, BAND_COUNT};
    use approx::assert_relative_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum SurfaceCall {
        Create(CurveId),
        Update(CurveId, bool),
        YLimits(f64, f64),
        Redraw,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<SurfaceCall>,
    }

    impl RecordingSurface {
        fn creates(&self, id: CurveId) -> usize {
            self.calls
                .iter()
                .filter(|c| **c == SurfaceCall::Create(id))
                .count()
        }

        fn updates(&self, id: CurveId) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, SurfaceCall::Update(i, _) if *i == id))
                .count()
        }
    }

    impl PlotSurface for RecordingSurface {
        fn create_curve(&mut self, id: CurveId, _data: &Series) {
            self.calls.push(SurfaceCall::Create(id));
        }

        fn update_curve(&mut self, id: CurveId, data: &Series) {
            self.calls.push(SurfaceCall::Update(id, data.is_empty()));
        }

        fn set_y_limits(&mut self, lower: f64, upper: f64) {
            self.calls.push(SurfaceCall::YLimits(lower, upper));
        }

        fn redraw(&mut self) {
            self.calls.push(SurfaceCall::Redraw);
        }
    }

    /// Constant mJy across bands, so the bluest band carries the cgs peak.
    fn flat_row(name: &str, mjy: f64) -> (String, [f64; BAND_COUNT]) {
        (name.to_string(), [mjy; BAND_COUNT])
    }

    fn controller() -> PlotController<RecordingSurface> {
        let catalog = Catalog::from_rows(vec![flat_row("HD123", 1.0), flat_row("Bright YSO", 1000.0)]);
        PlotController::new(catalog, WavelengthGrid::default(), RecordingSurface::default())
    }

    fn series(c: &PlotController<RecordingSurface>, id: CurveId) -> Option<Series> {
        c.curves().presence(id).series().cloned()
    }

    fn max_of(values: &[f64]) -> f64 {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    #[test]
    fn test_initial_refresh_shows_only_central_object() {
        let mut c = controller();
        c.refresh_model_curves().unwrap();

        assert!(series(&c, CurveId::CentralObject).is_some());
        assert!(c.curves().presence(CurveId::Disc).is_absent());
        assert!(c.curves().presence(CurveId::Combined).is_absent());
        assert!(c.curves().presence(CurveId::DataPoints).is_absent());
        assert_eq!(c.surface().calls.last(), Some(&SurfaceCall::Redraw));
    }

    #[test]
    fn test_disc_disabled_limit_is_five_times_central_peak() {
        let mut c = controller();
        c.refresh_model_curves().unwrap();

        let grid = WavelengthGrid::default();
        let expected = 5.0 * max_of(&blackbody_curve(grid.as_slice(), 3500.0));
        assert_relative_eq!(c.limits().upper, expected, max_relative = 1e-12);
        assert_eq!(c.limits().lower, Y_LOWER_BOUND);
    }

    #[test]
    fn test_enabled_disc_combined_is_sum() {
        let mut c = controller();
        c.set_intensity(ComponentId::Disc, -1.5).unwrap();
        c.toggle_disc_component(true).unwrap();

        let central = series(&c, CurveId::CentralObject).unwrap();
        let disc = series(&c, CurveId::Disc).unwrap();
        let combined = series(&c, CurveId::Combined).unwrap();
        assert_eq!(combined.len(), central.len());
        for i in 0..combined.len() {
            assert_eq!(combined.y[i], central.y[i] + disc.y[i]);
        }
        assert_relative_eq!(c.limits().upper, 5.0 * max_of(&combined.y), max_relative = 1e-12);
    }

    #[test]
    fn test_disabling_disc_empties_disc_and_combined() {
        let mut c = controller();
        c.toggle_disc_component(true).unwrap();
        c.toggle_disc_component(false).unwrap();

        assert_eq!(c.curves().presence(CurveId::Disc), &CurvePresence::Empty);
        assert_eq!(c.curves().presence(CurveId::Combined), &CurvePresence::Empty);
        let central = series(&c, CurveId::CentralObject).unwrap();
        assert_relative_eq!(c.limits().upper, 5.0 * max_of(&central.y), max_relative = 1e-12);
        assert!(!c.disc_inputs_editable());
    }

    #[test]
    fn test_curves_are_created_once_and_never_absent_again() {
        let mut c = controller();
        c.toggle_disc_component(true).unwrap();
        c.select_object("HD123").unwrap();
        c.toggle_disc_component(false).unwrap();
        c.clear_selection().unwrap();
        c.toggle_disc_component(true).unwrap();
        c.select_object("Bright YSO").unwrap();

        for id in CurveId::ALL {
            assert_eq!(c.surface().creates(id), 1, "{id:?}");
            assert!(!c.curves().presence(id).is_absent(), "{id:?}");
        }
    }

    #[test]
    fn test_faint_object_does_not_lower_limit() {
        let mut c = controller();
        c.refresh_model_curves().unwrap();
        let model_limit = c.limits().upper;

        c.select_object("HD123").unwrap();
        let entry = c.catalog().get("HD123").unwrap();
        assert!(5.0 * entry.flux_cgs[0] < model_limit);
        assert_eq!(c.limits().upper, model_limit);
        assert_eq!(
            series(&c, CurveId::DataPoints).unwrap().y,
            entry.flux_cgs.to_vec()
        );
    }

    #[test]
    fn test_bright_object_raises_limit_to_first_band() {
        let mut c = controller();
        c.select_object("Bright YSO").unwrap();

        let f_cgs = c.catalog().get("Bright YSO").unwrap().flux_cgs[0];
        assert_relative_eq!(c.limits().upper, 5.0 * f_cgs, max_relative = 1e-12);
        // set by the model first, then raised by the photometry
        let limit_calls: Vec<&SurfaceCall> = c
            .surface()
            .calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::YLimits(..)))
            .collect();
        assert_eq!(limit_calls.len(), 2);
        assert_eq!(limit_calls[1], &SurfaceCall::YLimits(Y_LOWER_BOUND, 5.0 * f_cgs));
    }

    #[test]
    fn test_clear_selection_keeps_model_curves() {
        let mut c = controller();
        c.toggle_disc_component(true).unwrap();
        c.select_object("HD123").unwrap();
        let before: Vec<CurvePresence> = [CurveId::CentralObject, CurveId::Disc, CurveId::Combined]
            .iter()
            .map(|id| c.curves().presence(*id).clone())
            .collect();
        let model_updates: usize = [CurveId::CentralObject, CurveId::Disc, CurveId::Combined]
            .iter()
            .map(|id| c.surface().updates(*id))
            .sum();

        c.clear_selection().unwrap();

        assert_eq!(c.curves().presence(CurveId::DataPoints), &CurvePresence::Empty);
        assert!(c.params().selection.is_none());
        let after: Vec<CurvePresence> = [CurveId::CentralObject, CurveId::Disc, CurveId::Combined]
            .iter()
            .map(|id| c.curves().presence(*id).clone())
            .collect();
        assert_eq!(before, after);
        let model_updates_after: usize = [CurveId::CentralObject, CurveId::Disc, CurveId::Combined]
            .iter()
            .map(|id| c.surface().updates(*id))
            .sum();
        assert_eq!(model_updates, model_updates_after);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut c = controller();
        c.toggle_disc_component(true).unwrap();
        c.select_object("HD123").unwrap();
        let snapshot: Vec<CurvePresence> =
            CurveId::ALL.iter().map(|id| c.curves().presence(*id).clone()).collect();
        let calls_before = c.surface().calls.len();

        c.refresh_model_curves().unwrap();

        let again: Vec<CurvePresence> =
            CurveId::ALL.iter().map(|id| c.curves().presence(*id).clone()).collect();
        assert_eq!(snapshot, again);
        for (a, b) in snapshot.iter().zip(&again) {
            if let (Some(a), Some(b)) = (a.series(), b.series()) {
                let bits_a: Vec<u64> = a.y.iter().map(|v| v.to_bits()).collect();
                let bits_b: Vec<u64> = b.y.iter().map(|v| v.to_bits()).collect();
                assert_eq!(bits_a, bits_b);
            }
        }
        // only the limit and the redraw reach the surface
        let new_calls = &c.surface().calls[calls_before..];
        assert!(new_calls
            .iter()
            .all(|call| matches!(call, SurfaceCall::YLimits(..) | SurfaceCall::Redraw)));
    }

    #[test]
    fn test_unknown_object_is_recoverable() {
        let mut c = controller();
        c.select_object("HD123").unwrap();
        let err = c.select_object("HD999").unwrap_err();
        assert_eq!(err, PlotError::ObjectNotFound("HD999".into()));
        assert_eq!(c.params().selection.as_deref(), Some("HD123"));
    }

    #[test]
    fn test_stale_selection_hides_scatter_after_redraw() {
        let mut c = controller();
        c.select_object("HD123").unwrap();
        c.catalog = Catalog::from_rows(vec![flat_row("AA Tau", 5.0)]);

        let err = c.refresh_model_curves().unwrap_err();

        assert_eq!(err, PlotError::ObjectNotFound("HD123".into()));
        assert_eq!(c.curves().presence(CurveId::DataPoints), &CurvePresence::Empty);
        assert!(series(&c, CurveId::CentralObject).is_some());
        assert_eq!(c.surface().calls.last(), Some(&SurfaceCall::Redraw));
    }

    #[test]
    fn test_staged_temperature_waits_for_refresh() {
        let mut c = controller();
        c.refresh_model_curves().unwrap();
        let calls = c.surface().calls.len();

        c.stage_temperature(ComponentId::CentralObject, 5000.0);
        assert_eq!(c.surface().calls.len(), calls);
        assert_eq!(c.params().component(ComponentId::CentralObject).temperature, 5000.0);

        c.refresh_model_curves().unwrap();
        let expected = 5.0 * max_of(&blackbody_curve(c.grid().as_slice(), 5000.0));
        assert_relative_eq!(c.limits().upper, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_replace_catalog_drops_selection() {
        let mut c = controller();
        c.select_object("HD123").unwrap();
        c.replace_catalog(Catalog::from_rows(vec![flat_row("AA Tau", 5.0)]))
            .unwrap();
        assert!(c.params().selection.is_none());
        assert_eq!(c.curves().presence(CurveId::DataPoints), &CurvePresence::Empty);
        assert!(c.select_object("HD123").is_err());
    }

    #[test]
    fn test_process_events_runs_all_and_collects_errors() {
        let mut c = controller();
        let mut queue: EventQueue = vec![
            UiEvent::ObjectSelected("nope".into()),
            UiEvent::TemperatureCommitted {
                component: ComponentId::CentralObject,
                kelvin: 5000.0,
            },
            UiEvent::IntensityChanged {
                component: ComponentId::CentralObject,
                log_scale: 1.0,
            },
            UiEvent::DiscToggled(true),
            UiEvent::UpdatePlot,
        ]
        .into_iter()
        .collect();

        let errors = c.process_events(&mut queue);

        assert_eq!(errors, vec![PlotError::ObjectNotFound("nope".into())]);
        assert!(queue.is_empty());
        let central = c.params().component(ComponentId::CentralObject);
        assert_eq!(central.temperature, 5000.0);
        assert_eq!(central.intensity, 1.0);
        assert!(c.disc_inputs_editable());
        assert_eq!(c.surface().creates(CurveId::Combined), 1);
    }
}
