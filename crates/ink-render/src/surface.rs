//! Paint-surface abstraction.
//!
//! Painters build `kurbo` paths in screen space and hand them to a
//! [`Surface`]. Backends translate those calls to a concrete target: a Vello
//! scene, an HTML canvas context, or an in-memory op log for tests.

use ink_core::Color;
use kurbo::BezPath;

/// A 2D paint target. Colors arrive with opacity already applied.
pub trait Surface {
    /// Wipe the whole surface.
    fn clear(&mut self);

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Draw one line of text with its alphabetic baseline at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: Color);
}

/// Measures the advance width of a single line of text.
pub trait TextMeasure {
    fn line_width(&self, line: &str, font_px: f32) -> f32;
}

/// Fixed-advance approximation for hosts without a font engine.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasure {
    /// Glyph advance as a fraction of the font size.
    pub char_width: f32,
}

impl ApproxMeasure {
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self { char_width: 0.6 }
    }
}

impl TextMeasure for ApproxMeasure {
    fn line_width(&self, line: &str, font_px: f32) -> f32 {
        line.chars().count() as f32 * font_px * self.char_width
    }
}
