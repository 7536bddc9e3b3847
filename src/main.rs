use std::path::Path;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use yso_plotter::app::YsoPlotterApp;
use yso_plotter::config::{AppConfig, CATALOG_ENV, CONFIG_FILE};
use yso_plotter::data::loader::load_catalog;
use yso_plotter::radiometry::WavelengthGrid;
use yso_plotter::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load(Path::new(CONFIG_FILE))?
        .with_overrides(std::env::var_os(CATALOG_ENV), std::env::args_os().nth(1));

    // Without a catalog there is nothing to fit against.
    let catalog = load_catalog(&config.catalog_path).context("cannot start without a catalog")?;
    log::info!(
        "Loaded {} objects from {}",
        catalog.len(),
        config.catalog_path.display()
    );

    let grid = WavelengthGrid::with_samples(config.wavelength_samples);
    let state = AppState::new(catalog, config.catalog_path.clone(), grid);
    let app = YsoPlotterApp::new(state);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Proto Plot 3000 – YSO Blackbody Fitter",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("{e}"))
}
