/// Data layer: catalog types and loading.
///
/// Architecture:
/// ```text
///  object_fluxes.csv   (name, 13 × mJy)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Catalog
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Catalog   │  name → CatalogEntry (raw mJy + cgs fluxes)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
