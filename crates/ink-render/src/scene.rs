//! Vello backend: paints into a `vello::Scene`.
//!
//! The caller presents the scene via wgpu. Text is logged only; glyph
//! shaping needs a font context the engine does not carry.

use crate::surface::Surface;
use ink_core::Color;
use kurbo::{Affine, BezPath, Cap, Join, Stroke};
use peniko::Fill;
use vello::Scene;

pub struct SceneSurface<'a> {
    scene: &'a mut Scene,
}

impl<'a> SceneSurface<'a> {
    pub fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }
}

impl Surface for SceneSurface<'_> {
    fn clear(&mut self) {
        self.scene.reset();
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let stroke = Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round);
        self.scene
            .stroke(&stroke, Affine::IDENTITY, to_peniko(color), None, path);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, to_peniko(color), None, path);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, _color: Color) {
        log::trace!("TEXT {text:?} at ({x}, {y}) {font_px}px");
    }
}

fn to_peniko(color: Color) -> peniko::Color {
    let [r, g, b, a] = color.to_rgba8();
    peniko::Color::from_rgba8(r, g, b, a)
}
