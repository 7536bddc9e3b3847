use std::collections::BTreeMap;

use crate::radiometry::{band_frequencies, catalog_flux_to_cgs, BAND_COUNT};

// ---------------------------------------------------------------------------
// CatalogEntry – one row of the flux table
// ---------------------------------------------------------------------------

/// A single object with its 13 band fluxes.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    /// Fluxes as stored in the catalog, milli-Jansky.
    pub raw_mjy: [f64; BAND_COUNT],
    /// `ν F_ν` in erg s⁻¹ cm⁻², band-wise.
    pub flux_cgs: [f64; BAND_COUNT],
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, raw_mjy: [f64; BAND_COUNT]) -> Self {
        let converted = catalog_flux_to_cgs(&raw_mjy, &band_frequencies());
        let mut flux_cgs = [0.0; BAND_COUNT];
        flux_cgs.copy_from_slice(&converted);
        Self {
            name: name.into(),
            raw_mjy,
            flux_cgs,
        }
    }

    /// Largest converted band flux.
    pub fn peak_flux_cgs(&self) -> f64 {
        self.flux_cgs
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded table
// ---------------------------------------------------------------------------

/// Read-only object catalog with a name index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// name → position in `entries`; sorted, so keys double as the dropdown list.
    index: BTreeMap<String, usize>,
}

impl Catalog {
    /// Build the catalog, converting fluxes once. The first row of a
    /// repeated name wins.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, [f64; BAND_COUNT])>,
    {
        let mut entries = Vec::new();
        let mut index = BTreeMap::new();

        for (name, raw) in rows {
            if index.contains_key(&name) {
                log::warn!("Duplicate catalog object '{name}', keeping first row");
                continue;
            }
            index.insert(name.clone(), entries.len());
            entries.push(CatalogEntry::new(name, raw));
        }

        Catalog { entries, index }
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Sorted unique object names.
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(name: &str, base: f64) -> (String, [f64; BAND_COUNT]) {
        let mut raw = [0.0; BAND_COUNT];
        for (i, v) in raw.iter_mut().enumerate() {
            *v = base + i as f64;
        }
        (name.to_string(), raw)
    }

    #[test]
    fn test_names_are_sorted_and_unique() {
        let catalog = Catalog::from_rows(vec![
            row("V1057 Cyg", 1.0),
            row("DG Tau", 2.0),
            row("V1057 Cyg", 9.0),
            row("AA Tau", 3.0),
        ]);
        let names: Vec<&str> = catalog.object_names().collect();
        assert_eq!(names, vec!["AA Tau", "DG Tau", "V1057 Cyg"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("V1057 Cyg").unwrap().raw_mjy[0], 1.0);
    }

    #[test]
    fn test_entry_carries_converted_fluxes() {
        let catalog = Catalog::from_rows(vec![row("HD123", 10.0)]);
        let entry = catalog.get("HD123").unwrap();
        let freqs = band_frequencies();
        for i in 0..BAND_COUNT {
            assert_relative_eq!(
                entry.flux_cgs[i],
                entry.raw_mjy[i] * 1e-3 * 1e-23 * freqs[i],
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_peak_flux_is_band_maximum() {
        let mut raw = [1.0; BAND_COUNT];
        raw[5] = 500.0;
        let entry = CatalogEntry::new("peaky", raw);
        assert_eq!(entry.peak_flux_cgs(), entry.flux_cgs[5]);
    }

    #[test]
    fn test_missing_name() {
        let catalog = Catalog::from_rows(vec![row("HD123", 1.0)]);
        assert!(catalog.get("HD999").is_none());
        assert!(!catalog.is_empty());
    }
}
