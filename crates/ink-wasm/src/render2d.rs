//! Canvas2D paint surface.
//!
//! Replays painter calls onto an HTML `<canvas>` through
//! `CanvasRenderingContext2d`.

use ink_core::Color;
use ink_render::Surface;
use kurbo::{BezPath, PathEl};
use web_sys::CanvasRenderingContext2d;

pub const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl<'a> Canvas2dSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    fn trace(&self, path: &BezPath) {
        let ctx = self.ctx;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => {
                    ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }
}

impl Surface for Canvas2dSurface<'_> {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        self.trace(path);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.ctx.stroke();
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.trace(path);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64, color: Color) {
        self.ctx.set_font(&format!("{font_px}px {FONT_FAMILY}"));
        self.ctx.set_fill_style_str(&color.to_css());
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fill_text failed: {e:?}");
        }
    }
}
