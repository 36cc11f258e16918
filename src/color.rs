use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: CAFV eligibility → Color32
// ---------------------------------------------------------------------------

/// One colour per eligibility category, aligned with the matrix columns.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    colors: Vec<Color32>,
}

impl CategoryPalette {
    pub fn new(categories: &[String]) -> Self {
        Self {
            colors: generate_palette(categories.len()),
        }
    }

    /// Colour for the category at `idx`; grey past the end.
    pub fn color_at(&self, idx: usize) -> Color32 {
        self.colors.get(idx).copied().unwrap_or(Color32::GRAY)
    }
}
