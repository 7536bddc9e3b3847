use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use yso_plotter::config::DEFAULT_CATALOG_PATH;
use yso_plotter::radiometry::{
    band_frequencies, band_wavelengths, blackbody_curve, cgs_to_catalog_flux, DISC_BRIGHTNESS_SCALE,
};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Two-blackbody photometry in catalog units (mJy) with ~5 % scatter.
fn synthetic_row(rng: &mut SimpleRng) -> Vec<f64> {
    let wavelengths = band_wavelengths();
    let star_t = rng.uniform(3000.0, 6500.0);
    let star_scale = 10f64.powf(rng.uniform(-1.5, 1.0));
    let disc_t = rng.uniform(150.0, 900.0);
    let disc_scale = 10f64.powf(rng.uniform(-4.0, 1.0)) * DISC_BRIGHTNESS_SCALE;

    let star = blackbody_curve(&wavelengths, star_t);
    let disc = blackbody_curve(&wavelengths, disc_t);
    let cgs: Vec<f64> = star
        .iter()
        .zip(&disc)
        .map(|(s, d)| (s * star_scale + d * disc_scale) * (1.0 + rng.gauss(0.0, 0.05)).max(0.5))
        .collect();

    cgs_to_catalog_flux(&cgs, &band_frequencies())
}

/// First CLI argument, or the catalog the viewer opens by default.
fn output_path(arg: Option<OsString>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))
}

fn main() -> Result<()> {
    let output_path = output_path(std::env::args_os().nth(1));
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let count = 40;
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for i in 0..count {
        let name = format!("YSO-{:03}", i + 1);
        let mut record = vec![name];
        record.extend(synthetic_row(&mut rng).iter().map(|v| format!("{v:.4}")));
        writer.write_record(&record).context("writing catalog row")?;
    }
    writer.flush().context("flushing catalog")?;

    println!("Wrote {count} objects to {}", output_path.display());
    Ok(())
}
