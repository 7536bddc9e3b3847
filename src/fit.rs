//! User-editable blackbody model parameters and the curves they produce.

use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::radiometry::{blackbody_curve, WavelengthGrid, DISC_BRIGHTNESS_SCALE};

/// Slider resolution for both intensity controls.
pub const INTENSITY_STEP: f64 = 0.1;

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// The two blackbody components of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    CentralObject,
    Disc,
}

impl ComponentId {
    pub const ALL: [ComponentId; 2] = [ComponentId::CentralObject, ComponentId::Disc];

    pub fn default_temperature(self) -> f64 {
        match self {
            ComponentId::CentralObject => 3500.0,
            ComponentId::Disc => 300.0,
        }
    }

    /// Allowed log10 intensity multipliers.
    pub fn intensity_range(self) -> RangeInclusive<f64> {
        match self {
            ComponentId::CentralObject => -3.0..=3.0,
            ComponentId::Disc => -10.0..=10.0,
        }
    }

    /// Fixed factor applied on top of `10^intensity`.
    pub fn brightness_scale(self) -> f64 {
        match self {
            ComponentId::CentralObject => 1.0,
            ComponentId::Disc => DISC_BRIGHTNESS_SCALE,
        }
    }

    fn index(self) -> usize {
        match self {
            ComponentId::CentralObject => 0,
            ComponentId::Disc => 1,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::CentralObject => write!(f, "Central Object Blackbody"),
            ComponentId::Disc => write!(f, "Disc Blackbody"),
        }
    }
}

/// Temperature and log-intensity of one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackbodyComponent {
    /// Kelvin.
    pub temperature: f64,
    /// log10 multiplier.
    pub intensity: f64,
}

impl BlackbodyComponent {
    pub fn new(temperature: f64, intensity: f64) -> Self {
        Self {
            temperature,
            intensity,
        }
    }

    /// Flux on `grid`, scaled by `10^intensity × scale`.
    pub fn evaluate(&self, grid: &WavelengthGrid, scale: f64) -> Vec<f64> {
        let factor = 10f64.powf(self.intensity) * scale;
        blackbody_curve(grid.as_slice(), self.temperature)
            .into_iter()
            .map(|v| v * factor)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// FitParameters
// ---------------------------------------------------------------------------

/// Everything the model refresh reads: both components, the disc switch
/// and the selected catalog object.
#[derive(Debug, Clone, PartialEq)]
pub struct FitParameters {
    components: [BlackbodyComponent; 2],
    pub disc_enabled: bool,
    /// `None` is the "-- Choose an Object --" placeholder.
    pub selection: Option<String>,
}

impl Default for FitParameters {
    fn default() -> Self {
        Self {
            components: ComponentId::ALL.map(|c| BlackbodyComponent::new(c.default_temperature(), 0.0)),
            disc_enabled: false,
            selection: None,
        }
    }
}

impl FitParameters {
    pub fn component(&self, id: ComponentId) -> &BlackbodyComponent {
        &self.components[id.index()]
    }

    pub fn set_temperature(&mut self, id: ComponentId, kelvin: f64) {
        self.components[id.index()].temperature = kelvin;
    }

    /// Clamped to the component's slider range.
    pub fn set_intensity(&mut self, id: ComponentId, log_scale: f64) {
        let range = id.intensity_range();
        self.components[id.index()].intensity = log_scale.clamp(*range.start(), *range.end());
    }
}

// ---------------------------------------------------------------------------
// ModelCurves
// ---------------------------------------------------------------------------

/// Curve arrays for one refresh, all on the same wavelength grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCurves {
    pub central: Vec<f64>,
    pub disc: Vec<f64>,
    pub combined: Vec<f64>,
}

impl ModelCurves {
    pub fn evaluate(grid: &WavelengthGrid, params: &FitParameters) -> Self {
        let central = params
            .component(ComponentId::CentralObject)
            .evaluate(grid, ComponentId::CentralObject.brightness_scale());
        let disc = params
            .component(ComponentId::Disc)
            .evaluate(grid, ComponentId::Disc.brightness_scale());
        let combined = central.iter().zip(&disc).map(|(a, b)| a + b).collect();
        Self {
            central,
            disc,
            combined,
        }
    }
}

/// Maximum of a curve, `0.0` when empty.
pub fn curve_max(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Temperature entry validation
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("{component} temperature '{text}' is not a number")]
    NotANumber { component: ComponentId, text: String },
    #[error("{component} temperature must be a positive finite value in Kelvin, got {value}")]
    OutOfRange { component: ComponentId, value: f64 },
}

/// Parse a temperature entry box. Only positive finite Kelvin are accepted.
pub fn parse_temperature(component: ComponentId, text: &str) -> Result<f64, ParameterError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| ParameterError::NotANumber {
            component,
            text: text.to_string(),
        })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ParameterError::OutOfRange { component, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let params = FitParameters::default();
        assert_eq!(params.component(ComponentId::CentralObject).temperature, 3500.0);
        assert_eq!(params.component(ComponentId::Disc).temperature, 300.0);
        assert_eq!(params.component(ComponentId::Disc).intensity, 0.0);
        assert!(!params.disc_enabled);
        assert!(params.selection.is_none());
    }

    #[test]
    fn test_intensity_is_clamped() {
        let mut params = FitParameters::default();
        params.set_intensity(ComponentId::CentralObject, 7.5);
        params.set_intensity(ComponentId::Disc, -12.0);
        assert_eq!(params.component(ComponentId::CentralObject).intensity, 3.0);
        assert_eq!(params.component(ComponentId::Disc).intensity, -10.0);
    }

    #[test]
    fn test_disc_carries_fixed_brightness_scale() {
        let grid = WavelengthGrid::with_samples(20);
        let mut params = FitParameters::default();
        params.set_temperature(ComponentId::Disc, 3500.0);
        params.set_intensity(ComponentId::Disc, 1.0);
        let curves = ModelCurves::evaluate(&grid, &params);
        for (d, c) in curves.disc.iter().zip(&curves.central) {
            assert_relative_eq!(*d, c * 10.0 * 100.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_combined_is_elementwise_sum() {
        let grid = WavelengthGrid::default();
        let mut params = FitParameters::default();
        params.set_intensity(ComponentId::Disc, -2.3);
        let curves = ModelCurves::evaluate(&grid, &params);
        assert_eq!(curves.combined.len(), grid.len());
        for i in 0..grid.len() {
            assert_eq!(curves.combined[i], curves.central[i] + curves.disc[i]);
        }
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature(ComponentId::Disc, " 300 "), Ok(300.0));
        assert!(matches!(
            parse_temperature(ComponentId::Disc, "warm"),
            Err(ParameterError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_temperature(ComponentId::CentralObject, "-5"),
            Err(ParameterError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_temperature(ComponentId::CentralObject, "inf"),
            Err(ParameterError::OutOfRange { .. })
        ));
        assert!(parse_temperature(ComponentId::CentralObject, "0").is_err());
    }

    #[test]
    fn test_curve_max() {
        assert_eq!(curve_max(&[]), 0.0);
        assert_eq!(curve_max(&[1e-12, 3e-9, 2e-10]), 3e-9);
    }
}
