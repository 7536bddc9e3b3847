use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::radiometry::GRID_SAMPLES;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "yso-plotter.json";

/// Catalog read when neither config, env nor CLI name one.
pub const DEFAULT_CATALOG_PATH: &str = "data/object_fluxes.csv";

/// Environment variable overriding the catalog path.
pub const CATALOG_ENV: &str = "YSO_PLOTTER_CATALOG";

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the JSON file:
///
/// ```json
/// { "catalog_path": "data/object_fluxes.csv", "window_size": [1000, 760] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub window_size: [f32; 2],
    pub wavelength_samples: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            window_size: [1000.0, 760.0],
            wavelength_samples: GRID_SAMPLES,
        }
    }
}

impl AppConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.wavelength_samples < 2 {
            bail!(
                "wavelength_samples must be at least 2, got {}",
                self.wavelength_samples
            );
        }
        Ok(())
    }

    /// Apply `$YSO_PLOTTER_CATALOG`, then the command-line path, in that order.
    pub fn with_overrides(mut self, env_catalog: Option<OsString>, cli_catalog: Option<OsString>) -> Self {
        if let Some(path) = env_catalog.filter(|p| !p.is_empty()) {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = cli_catalog {
            self.catalog_path = PathBuf::from(path);
        }
        self
    }
}
