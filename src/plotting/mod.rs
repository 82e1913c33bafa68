//! PNG rendering of the two wind charts.

pub mod direction;
pub mod error;
pub mod fonts;
pub mod speed;
pub mod viewer;

use plotters::style::RGBColor;

/// Font family every chart text is drawn with; see [`fonts::ensure_font`].
pub(crate) const FONT: &str = "sans-serif";
/// Steel blue.
pub(crate) const BAR_FILL: RGBColor = RGBColor(70, 130, 180);
pub(crate) const GRID: RGBColor = RGBColor(200, 200, 200);

/// Largest title size.
const TITLE_SIZE: f64 = 36.0;
const MIN_TITLE_SIZE: f64 = 10.0;
/// Average glyph advance relative to the font size, generous for sans-serif.
const GLYPH_WIDTH: f64 = 0.6;

/// Font size at which `title` fits into 90% of `width` pixels.
pub(crate) fn title_size(width: u32, title: &str) -> f64 {
    let chars = title.chars().count().max(1) as f64;
    let fitting = f64::from(width) * 0.9 / (GLYPH_WIDTH * chars);
    fitting.clamp(MIN_TITLE_SIZE, TITLE_SIZE).floor()
}

/// Smallest "round" number (1, 2, 2.5 or 5 times a power of ten) that is at
/// least `value`. Used as the top of value axes. Returns 1 for non-positive input.
pub(crate) fn nice_ceil(value: f64) -> f64 {
    if !(value.is_finite() && value > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|n| *n >= fraction)
        .unwrap_or(10.0);
    nice * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ceil() {
        assert_eq!(nice_ceil(0.0), 1.0);
        assert_eq!(nice_ceil(-3.0), 1.0);
        assert_eq!(nice_ceil(f64::NAN), 1.0);
        assert_eq!(nice_ceil(3.0), 5.0);
        assert_eq!(nice_ceil(100.0), 100.0);
        assert_eq!(nice_ceil(101.0), 200.0);
        assert_eq!(nice_ceil(2200.0), 2500.0);
        assert_eq!(nice_ceil(7.0), 10.0);
    }

    #[test]
    fn test_title_size_shrinks_with_width() {
        let title = "Hourly Wind Direction at 100m (degrees)";
        assert_eq!(title_size(1200, title), 36.0);
        let small = title_size(500, title);
        assert_eq!(small, 19.0);
        // fits: 39 glyphs at 0.6 em stay within 500 px
        assert!(39.0 * GLYPH_WIDTH * small <= 500.0);
        assert_eq!(title_size(50, title), MIN_TITLE_SIZE);
    }
}
