//! Tunable constants shared by tools, hit testing, and painting.

use serde::{Deserialize, Serialize};

/// How the eraser decides that a shape is under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraserHitMode {
    /// Only the shape's first anchor counts: a shape is erasable when its
    /// anchor 1 lies within the eraser radius.
    #[default]
    Anchor,
    /// Full shape geometry, widened by the eraser radius.
    Geometry,
}

/// Configuration for an Inkflow canvas.
///
/// Every field has a default matching the stock whiteboard behavior; hosts
/// override individual fields with struct-update syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Eraser proximity radius in canvas pixels. Default: **20**.
    pub eraser_radius: f32,
    pub eraser_hit_mode: EraserHitMode,

    /// Pointer-tool tolerance around line, arrow, and pencil strokes. Default: **5**.
    pub hit_tolerance: f32,

    /// Rectangle corner radius. Default: **10**.
    pub corner_radius: f32,

    /// Arrowhead length cap; the head is also capped at ⅓ of the shaft. Default: **20**.
    pub arrow_head_max: f32,
    /// Angle between each head stroke and the shaft, in degrees. Default: **30**.
    pub arrow_head_angle_deg: f32,

    /// Font size at text scale 1, before zoom. Default: **25**.
    pub text_base_px: f32,
    /// Line height as a multiple of the scaled font size. Default: **1.2**.
    pub text_line_height: f32,
    /// Vertical offset added to the stored text anchor on commit so the
    /// painted baseline lines up with the overlay caret. Default: **20**.
    pub text_baseline_offset: f32,
    /// Text scale = stroke width / this divisor. Default: **4**.
    pub stroke_width_divisor: f32,
    /// Average glyph advance as a fraction of the font size, used when the
    /// host cannot measure text. Default: **0.6**.
    pub text_char_width: f32,

    /// Duration of programmatic move animations in milliseconds. Default: **100**.
    pub animation_ms: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            eraser_radius: 20.0,
            eraser_hit_mode: EraserHitMode::Anchor,
            hit_tolerance: 5.0,
            corner_radius: 10.0,
            arrow_head_max: 20.0,
            arrow_head_angle_deg: 30.0,
            text_base_px: 25.0,
            text_line_height: 1.2,
            text_baseline_offset: 20.0,
            stroke_width_divisor: 4.0,
            text_char_width: 0.6,
            animation_ms: 100.0,
        }
    }
}

impl CanvasConfig {
    /// Text scale factor derived from a stroke width.
    pub fn text_scale(&self, stroke_width: f32) -> f32 {
        stroke_width / self.stroke_width_divisor
    }

    /// Font size in pixels for a text scale at a given zoom.
    pub fn font_px(&self, text_scale: f32, zoom: f32) -> f32 {
        self.text_base_px * text_scale * zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_font_size_for_stroke_4_is_base() {
        let config = CanvasConfig::default();
        let scale = config.text_scale(4.0);
        assert_eq!(scale, 1.0);
        assert_eq!(config.font_px(scale, 1.0), 25.0);
        assert_eq!(config.font_px(scale, 2.0), 50.0);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = CanvasConfig {
            eraser_radius: 8.0,
            ..CanvasConfig::default()
        };
        assert_eq!(config.eraser_radius, 8.0);
        assert_eq!(config.hit_tolerance, 5.0);
    }
}
