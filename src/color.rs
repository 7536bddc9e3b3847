use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::fit::ComponentId;
use crate::surface::CurveId;

// ---------------------------------------------------------------------------
// Base colours
// ---------------------------------------------------------------------------

const CENTRAL_LINE: Srgb<u8> = Srgb::new(0x1f, 0x77, 0xb4);
const DISC_LINE: Srgb<u8> = Srgb::new(0xd6, 0x27, 0x28);
const COMBINED_LINE: Srgb<u8> = Srgb::new(0x00, 0x00, 0x00);

const CENTRAL_TROUGH: Srgb<u8> = Srgb::new(0xad, 0xd8, 0xe6); // light blue
const DISC_TROUGH: Srgb<u8> = Srgb::new(0xff, 0x72, 0x56); // coral1

fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Curve colours
// ---------------------------------------------------------------------------

/// Stroke colour for each plotted artifact. Photometry markers are black
/// outlines.
pub fn curve_color(id: CurveId) -> Color32 {
    match id {
        CurveId::DataPoints | CurveId::Combined => to_color32(COMBINED_LINE),
        CurveId::CentralObject => to_color32(CENTRAL_LINE),
        CurveId::Disc => to_color32(DISC_LINE),
    }
}

// ---------------------------------------------------------------------------
// Slider troughs
// ---------------------------------------------------------------------------

/// Washed-out variant used while a control is read-only.
pub fn muted(rgb: Srgb<u8>) -> Color32 {
    let hsl: Hsl = rgb.into_format::<f32>().into_color();
    let faded = Hsl::new(hsl.hue, hsl.saturation * 0.25, 0.93);
    let back: Srgb = faded.into_color();
    to_color32(back.into_format())
}

/// Slider trough fill for a component.
pub fn trough_color(component: ComponentId, enabled: bool) -> Color32 {
    let base = match component {
        ComponentId::CentralObject => CENTRAL_TROUGH,
        ComponentId::Disc => DISC_TROUGH,
    };
    if enabled {
        to_color32(base)
    } else {
        muted(base)
    }
}
