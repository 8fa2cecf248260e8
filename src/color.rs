use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
///
/// With only a few series the first hue decides the whole look, so
/// `hue_offset` (degrees) picks where the wheel starts.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
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
// Chart colours
// ---------------------------------------------------------------------------

/// Colours for the waveform chart: the trace and the two arrival markers.
#[derive(Debug, Clone, Copy)]
pub struct ChartColors {
    pub trace: Color32,
    pub catalogued: Color32,
    pub predicted: Color32,
}

impl Default for ChartColors {
    fn default() -> Self {
        // 200° puts the trace in the blues, markers land on green and red.
        let palette = generate_palette(3, 200.0);
        Self {
            trace: palette[0],
            catalogued: palette[1],
            predicted: palette[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0, 0.0).is_empty());
        assert_eq!(generate_palette(5, 0.0).len(), 5);
    }

    #[test]
    fn chart_colours_are_distinct() {
        let c = ChartColors::default();
        assert_ne!(c.trace, c.catalogued);
        assert_ne!(c.trace, c.predicted);
        assert_ne!(c.catalogued, c.predicted);
    }
}
