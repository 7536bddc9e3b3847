//! Radiometry engine: Planck curves and catalog flux conversion.
//!
//! All quantities are CGS. Wavelengths enter in micrometres and are
//! converted to centimetres inside the Planck evaluation.

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

/// Physical constants in CGS units.
pub struct Cgs;

impl Cgs {
    /// Planck constant, erg s.
    pub const PLANCK_CONSTANT: f64 = 6.626e-27;

    /// Speed of light, cm/s.
    pub const SPEED_OF_LIGHT: f64 = 2.998e10;

    /// Boltzmann constant, erg/K.
    pub const BOLTZMANN_CONSTANT: f64 = 1.381e-16;

    /// 1 Jansky in erg s⁻¹ cm⁻² Hz⁻¹.
    pub const JANSKY: f64 = 1e-23;
}

/// Micrometres to centimetres.
pub const MICRON_TO_CM: f64 = 1e-4;

/// Catalog fluxes are stored in milli-Jansky.
pub const MILLI_JANSKY_TO_JANSKY: f64 = 1e-3;

/// Fixed distance / solid-angle normalization applied to every Planck curve.
///
/// Not derived per object; the catalog values were matched against curves
/// carrying this factor.
pub const FLUX_NORMALIZATION: f64 = 1e-24;

/// Extra brightness factor applied to the disc component on top of its
/// intensity slider.
pub const DISC_BRIGHTNESS_SCALE: f64 = 1e2;

// ---------------------------------------------------------------------------
// Wavelength grid
// ---------------------------------------------------------------------------

/// log10 of the first grid wavelength (0.1 µm).
pub const GRID_START_EXPONENT: f64 = -1.0;
/// log10 of the last grid wavelength (10 000 µm).
pub const GRID_STOP_EXPONENT: f64 = 4.0;
/// Default number of grid samples.
pub const GRID_SAMPLES: usize = 200;

/// Log-spaced wavelength samples in micrometres, endpoints included.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthGrid {
    microns: Vec<f64>,
}

impl WavelengthGrid {
    /// `samples` points from `10^start_exp` to `10^stop_exp`.
    pub fn log_spaced(start_exp: f64, stop_exp: f64, samples: usize) -> Self {
        let microns = match samples {
            0 => Vec::new(),
            1 => vec![10f64.powf(start_exp)],
            n => {
                let step = (stop_exp - start_exp) / (n - 1) as f64;
                (0..n)
                    .map(|i| 10f64.powf(start_exp + step * i as f64))
                    .collect()
            }
        };
        Self { microns }
    }

    /// The standard 0.1–10 000 µm grid with `samples` points.
    pub fn with_samples(samples: usize) -> Self {
        Self::log_spaced(GRID_START_EXPONENT, GRID_STOP_EXPONENT, samples)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.microns
    }

    pub fn len(&self) -> usize {
        self.microns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.microns.is_empty()
    }
}

impl Default for WavelengthGrid {
    fn default() -> Self {
        Self::with_samples(GRID_SAMPLES)
    }
}

// ---------------------------------------------------------------------------
// Photometric bands
// ---------------------------------------------------------------------------

/// Number of photometric bands in every catalog row.
pub const BAND_COUNT: usize = 13;

/// One of the fixed observation bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotometricBand {
    pub name: &'static str,
    /// Central wavelength in micrometres.
    pub wavelength_um: f64,
}

impl PhotometricBand {
    const fn new(name: &'static str, wavelength_um: f64) -> Self {
        Self {
            name,
            wavelength_um,
        }
    }

    /// Central frequency in Hz.
    pub fn frequency_hz(&self) -> f64 {
        Cgs::SPEED_OF_LIGHT / (self.wavelength_um * MICRON_TO_CM)
    }
}

/// Catalog column order. Position `i` here is flux column `i + 1` in the CSV.
pub const BANDS: [PhotometricBand; BAND_COUNT] = [
    PhotometricBand::new("B", 0.445),
    PhotometricBand::new("V", 0.551),
    PhotometricBand::new("R", 0.658),
    PhotometricBand::new("I", 0.801),
    PhotometricBand::new("J", 1.25),
    PhotometricBand::new("H", 1.65),
    PhotometricBand::new("Ks", 2.2),
    PhotometricBand::new("IRAC 3.6", 3.6),
    PhotometricBand::new("IRAC 4.5", 4.5),
    PhotometricBand::new("IRAC 5.8", 5.8),
    PhotometricBand::new("IRAC 8.0", 8.0),
    PhotometricBand::new("MIPS 24", 24.0),
    PhotometricBand::new("MIPS 70", 70.0),
];

pub fn band_wavelengths() -> [f64; BAND_COUNT] {
    BANDS.map(|b| b.wavelength_um)
}

pub fn band_frequencies() -> [f64; BAND_COUNT] {
    BANDS.map(|b| b.frequency_hz())
}

// ---------------------------------------------------------------------------
// Planck curve
// ---------------------------------------------------------------------------

/// Normalized blackbody flux density at each wavelength (µm) for `temperature` K.
///
/// Evaluates `4 λ N · 2hc² / λ_cm⁵ / (exp(hc / λ_cm k T) - 1)` with `λ` in
/// micrometres for the leading factor and `N` = [`FLUX_NORMALIZATION`].
/// `temperature` must be positive; it is not validated here.
pub fn blackbody_curve(wavelengths_um: &[f64], temperature: f64) -> Vec<f64> {
    let h = Cgs::PLANCK_CONSTANT;
    let c = Cgs::SPEED_OF_LIGHT;
    let kb = Cgs::BOLTZMANN_CONSTANT;

    wavelengths_um
        .iter()
        .map(|&lambda| {
            let lambda_cm = lambda * MICRON_TO_CM;
            let radiance = 2.0 * h * c * c / lambda_cm.powi(5);
            let occupancy = ((h * c) / (lambda_cm * kb * temperature)).exp_m1().recip();
            4.0 * lambda * FLUX_NORMALIZATION * radiance * occupancy
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Catalog unit conversion
// ---------------------------------------------------------------------------

/// Convert milli-Jansky catalog fluxes to `ν F_ν` in CGS, band-wise.
pub fn catalog_flux_to_cgs(raw_mjy: &[f64], frequencies: &[f64]) -> Vec<f64> {
    raw_mjy
        .iter()
        .zip(frequencies)
        .map(|(&flux, &nu)| flux * MILLI_JANSKY_TO_JANSKY * Cgs::JANSKY * nu)
        .collect()
}

/// Inverse of [`catalog_flux_to_cgs`].
pub fn cgs_to_catalog_flux(cgs: &[f64], frequencies: &[f64]) -> Vec<f64> {
    cgs.iter()
        .zip(frequencies)
        .map(|(&flux, &nu)| flux / (MILLI_JANSKY_TO_JANSKY * Cgs::JANSKY * nu))
        .collect()
}
