use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::Catalog;
use crate::radiometry::BAND_COUNT;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the flux catalog from a CSV file.
///
/// Layout: no header, one object per row, comma separated:
/// `name, f_B, f_V, … , f_70` with the 13 fluxes in milli-Jansky in the
/// band order of [`crate::radiometry::BANDS`].
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening catalog {}", path.display()))?;
    read_catalog(file).with_context(|| format!("reading catalog {}", path.display()))
}

/// Parse catalog rows from any reader.
pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() != BAND_COUNT + 1 {
            bail!(
                "CSV row {row_no}: expected {} fields (name + {BAND_COUNT} fluxes), found {}",
                BAND_COUNT + 1,
                record.len()
            );
        }

        let name = record.get(0).unwrap_or("").to_string();
        if name.is_empty() {
            bail!("CSV row {row_no}: empty object name");
        }

        let mut fluxes = [0.0; BAND_COUNT];
        for (band, slot) in fluxes.iter_mut().enumerate() {
            let tok = record.get(band + 1).unwrap_or("");
            *slot = tok.parse::<f64>().with_context(|| {
                format!("CSV row {row_no}, flux[{band}]: '{tok}' is not a number")
            })?;
        }

        rows.push((name, fluxes));
    }

    Ok(Catalog::from_rows(rows))
}
