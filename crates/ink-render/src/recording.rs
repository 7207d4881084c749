//! In-memory surface that records paint calls.
//!
//! Used for headless tests and for diffing two renders of the same state.

use crate::surface::Surface;
use ink_core::Color;
use kurbo::BezPath;

/// One recorded paint call. Paths are stored as SVG path data.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Stroke { path: String, color: [u8; 4], width: f64 },
    Fill { path: String, color: [u8; 4] },
    Text { text: String, x: f64, y: f64, font_px: f64, color: [u8; 4] },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops recorded since the last `clear`.
    pub fn frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }

    pub fn texts(&self) -> Vec<&str> {
        self.frame()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke {
            path: path.to_svg(),
            color: color.to_rgba8(),
            width,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.ops.push(DrawOp::Fill {
            path: path.to_svg(),
            color: color.to_rgba8(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font_px,
            color: color.to_rgba8(),
        });
    }
}
