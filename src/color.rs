use eframe::egui::Color32;
use palette::{named, Srgb};
use plotters::style::RGBColor;

use crate::data::model::Species;

// ---------------------------------------------------------------------------
// Species colours
// ---------------------------------------------------------------------------

/// The one colour table used by every image and by the in-app viewer.
pub fn species_srgb(species: Species) -> Srgb<u8> {
    match species {
        Species::Setosa => named::BLACK,
        Species::Versicolor => named::ORANGE,
        Species::Virginica => named::GREEN,
    }
}

/// Colour for egui widgets and plots.
pub fn species_color32(species: Species) -> Color32 {
    let c = species_srgb(species);
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Colour for plotters drawings.
pub fn species_rgb(species: Species) -> RGBColor {
    let c = species_srgb(species);
    RGBColor(c.red, c.green, c.blue)
}

/// Legend entries (label → colour) in species order.
pub fn legend_entries() -> Vec<(String, Color32)> {
    Species::ALL
        .iter()
        .map(|&sp| (sp.to_string(), species_color32(sp)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_is_fixed() {
        assert_eq!(species_color32(Species::Setosa), Color32::from_rgb(0, 0, 0));
        assert_eq!(species_color32(Species::Versicolor), Color32::from_rgb(255, 165, 0));
        assert_eq!(species_color32(Species::Virginica), Color32::from_rgb(0, 128, 0));
    }

    #[test]
    fn egui_and_plotters_agree() {
        for sp in Species::ALL {
            let a = species_color32(sp);
            let b = species_rgb(sp);
            assert_eq!((a.r(), a.g(), a.b()), (b.0, b.1, b.2));
        }
    }
}
