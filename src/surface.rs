//! Plotting-surface capability and the retained scene the egui view draws.

use std::collections::BTreeMap;

use crate::controller::{INITIAL_Y_UPPER, Y_LOWER_BOUND};

// ---------------------------------------------------------------------------
// Curve identities
// ---------------------------------------------------------------------------

/// The four artifacts the controller owns on the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurveId {
    DataPoints,
    CentralObject,
    Disc,
    Combined,
}

impl CurveId {
    pub const ALL: [CurveId; 4] = [
        CurveId::DataPoints,
        CurveId::CentralObject,
        CurveId::Disc,
        CurveId::Combined,
    ];

    /// Drawing order, lowest first. Photometry sits beneath the models.
    pub fn z_order(self) -> u8 {
        match self {
            CurveId::DataPoints => 0,
            CurveId::CentralObject => 1,
            CurveId::Disc => 2,
            CurveId::Combined => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CurveId::DataPoints => "Photometry",
            CurveId::CentralObject => "Central object",
            CurveId::Disc => "Disc",
            CurveId::Combined => "Combined",
        }
    }

    pub fn is_scatter(self) -> bool {
        self == CurveId::DataPoints
    }

    pub(crate) fn index(self) -> usize {
        match self {
            CurveId::DataPoints => 0,
            CurveId::CentralObject => 1,
            CurveId::Disc => 2,
            CurveId::Combined => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Paired x/y samples of one curve. Empty hides the curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `[log10 x, log10 y]` pairs, dropping samples that cannot sit on log axes.
    pub fn log_points(&self) -> Vec<[f64; 2]> {
        self.x
            .iter()
            .zip(&self.y)
            .filter(|(x, y)| **x > 0.0 && **y > 0.0 && y.is_finite())
            .map(|(x, y)| [x.log10(), y.log10()])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PlotSurface capability
// ---------------------------------------------------------------------------

/// What the controller needs from a plotting backend.
pub trait PlotSurface {
    /// Called once per curve, on its first non-empty update.
    fn create_curve(&mut self, id: CurveId, data: &Series);
    fn update_curve(&mut self, id: CurveId, data: &Series);
    fn set_y_limits(&mut self, lower: f64, upper: f64);
    fn redraw(&mut self);
}

// ---------------------------------------------------------------------------
// PlotScene – retained surface for the immediate-mode view
// ---------------------------------------------------------------------------

/// Retained copy of everything the controller pushed, read each frame by
/// [`crate::ui::plot::model_plot`].
#[derive(Debug, Clone)]
pub struct PlotScene {
    curves: BTreeMap<CurveId, Series>,
    y_limits: (f64, f64),
    revision: u64,
    bounds_dirty: bool,
}

impl Default for PlotScene {
    fn default() -> Self {
        Self {
            curves: BTreeMap::new(),
            y_limits: (Y_LOWER_BOUND, INITIAL_Y_UPPER),
            revision: 0,
            bounds_dirty: true,
        }
    }
}

impl PlotScene {
    /// Non-empty curves ordered by z-order.
    pub fn visible_curves(&self) -> Vec<(CurveId, &Series)> {
        let mut visible: Vec<(CurveId, &Series)> = self
            .curves
            .iter()
            .filter(|(_, s)| !s.is_empty())
            .map(|(id, s)| (*id, s))
            .collect();
        visible.sort_by_key(|(id, _)| id.z_order());
        visible
    }

    pub fn curve(&self, id: CurveId) -> Option<&Series> {
        self.curves.get(&id)
    }

    pub fn y_limits(&self) -> (f64, f64) {
        self.y_limits
    }

    /// Number of completed redraws.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True once after the limits changed or a reset was requested.
    pub fn take_bounds_dirty(&mut self) -> bool {
        std::mem::take(&mut self.bounds_dirty)
    }

    /// Ask the view to re-apply the current limits on the next frame.
    pub fn request_bounds_reset(&mut self) {
        self.bounds_dirty = true;
    }
}

impl PlotSurface for PlotScene {
    fn create_curve(&mut self, id: CurveId, data: &Series) {
        if self.curves.insert(id, data.clone()).is_some() {
            log::warn!("Curve {id:?} created twice");
        }
    }

    fn update_curve(&mut self, id: CurveId, data: &Series) {
        self.curves.insert(id, data.clone());
    }

    fn set_y_limits(&mut self, lower: f64, upper: f64) {
        if self.y_limits != (lower, upper) {
            self.y_limits = (lower, upper);
            self.bounds_dirty = true;
        }
    }

    fn redraw(&mut self) {
        self.revision += 1;
    }
}
