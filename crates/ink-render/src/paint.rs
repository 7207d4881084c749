//! Shape list → surface paint calls.
//!
//! Every repaint is a full replay: clear, then paint each committed shape
//! back to front. Shapes live in canvas space; painters scale by the current
//! zoom when building screen-space paths.

use crate::surface::Surface;
use ink_core::geometry::{diameter_circle, normalize_rect};
use ink_core::{CanvasConfig, Color, Shape, ShapeKind};
use kurbo::{Affine, BezPath, Circle, Rect, Shape as _};

/// Flattening tolerance for curved kurbo shapes, in screen pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Translucent fill of the eraser cursor preview.
const ERASER_PREVIEW_FILL: Color = Color::rgba(0.5, 0.5, 0.5, 0.2);
const ERASER_PREVIEW_STROKE: Color = Color::rgba(0.5, 0.5, 0.5, 0.6);

/// Clear the surface and paint every shape in order.
pub fn paint_scene<'a>(
    surface: &mut dyn Surface,
    shapes: impl IntoIterator<Item = &'a Shape>,
    zoom: f32,
    config: &CanvasConfig,
) {
    surface.clear();
    for shape in shapes {
        paint_shape(surface, shape, zoom, config);
    }
}

/// Paint a single shape. Holds no state between calls.
pub fn paint_shape(surface: &mut dyn Surface, shape: &Shape, zoom: f32, config: &CanvasConfig) {
    log::trace!("PAINT {} {} at ({}, {})", shape.kind.name(), shape.id, shape.x1, shape.y1);

    let scale = Affine::scale(zoom as f64);
    let color = shape.color.with_alpha(shape.opacity);
    let width = (shape.stroke_width * zoom) as f64;

    match &shape.kind {
        ShapeKind::Line => {
            let path = segment_path(shape.anchor1(), shape.anchor2());
            surface.stroke_path(&(scale * path), color, width);
        }

        ShapeKind::Arrow => {
            let tip = shape.anchor2();
            surface.stroke_path(&(scale * segment_path(shape.anchor1(), tip)), color, width);
            if let Some(barbs) = arrow_head(shape, config) {
                for barb in barbs {
                    surface.stroke_path(&(scale * segment_path(tip, barb)), color, width);
                }
            }
        }

        ShapeKind::Rectangle => {
            let path = scale * rounded_rect_path(shape, config.corner_radius);
            paint_filled(surface, shape, &path, color, width);
        }

        ShapeKind::Circle => {
            let ((cx, cy), r) = diameter_circle(shape.x1, shape.y1, shape.x2, shape.y2);
            let path = scale * Circle::new((cx as f64, cy as f64), r as f64).to_path(PATH_TOLERANCE);
            paint_filled(surface, shape, &path, color, width);
        }

        ShapeKind::Text { text, text_width, .. } => {
            let font_px = config.font_px(*text_width, zoom);
            let line_height = font_px * config.text_line_height;
            let x = (shape.x1 * zoom) as f64;
            for (i, line) in text.split('\n').enumerate() {
                let y = (shape.y1 * zoom + i as f32 * line_height) as f64;
                surface.fill_text(line, x, y, font_px as f64, color);
            }
        }

        ShapeKind::Pencil { points } => match points.as_slice() {
            [] => {}
            [(x, y)] => {
                let dot = Circle::new((*x as f64, *y as f64), (shape.stroke_width / 2.0) as f64);
                surface.fill_path(&(scale * dot.to_path(PATH_TOLERANCE)), color);
            }
            [first, rest @ ..] => {
                let mut path = BezPath::new();
                path.move_to((first.0 as f64, first.1 as f64));
                for p in rest {
                    path.line_to((p.0 as f64, p.1 as f64));
                }
                surface.stroke_path(&(scale * path), color, width);
            }
        },
    }
}

/// Translucent circle drawn under the cursor while the eraser is active.
pub fn paint_eraser_preview(
    surface: &mut dyn Surface,
    x: f32,
    y: f32,
    zoom: f32,
    config: &CanvasConfig,
) {
    let circle = Circle::new((x as f64, y as f64), config.eraser_radius as f64);
    let path = Affine::scale(zoom as f64) * circle.to_path(PATH_TOLERANCE);
    surface.fill_path(&path, ERASER_PREVIEW_FILL);
    surface.stroke_path(&path, ERASER_PREVIEW_STROKE, 1.0);
}

/// End points of the two arrowhead strokes, both anchored at anchor 2.
///
/// Head length is `min(arrow_head_max, length / 3)`; each stroke leaves the
/// tip at ±`arrow_head_angle_deg` from the reversed shaft direction.
/// Returns `None` for a zero-length arrow.
pub fn arrow_head(shape: &Shape, config: &CanvasConfig) -> Option<[(f32, f32); 2]> {
    let length = shape.segment_length();
    if length == 0.0 {
        return None;
    }
    let head = config.arrow_head_max.min(length / 3.0);
    let angle = (shape.y2 - shape.y1).atan2(shape.x2 - shape.x1);
    let spread = config.arrow_head_angle_deg.to_radians();
    let barb = |a: f32| (shape.x2 - head * a.cos(), shape.y2 - head * a.sin());
    Some([barb(angle - spread), barb(angle + spread)])
}

// ─── Path builders ──────────────────────────────────────────────────────

fn segment_path(from: (f32, f32), to: (f32, f32)) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((from.0 as f64, from.1 as f64));
    path.line_to((to.0 as f64, to.1 as f64));
    path
}

/// Rounded rectangle through both anchors, radius clamped to half the
/// shorter side so tiny rectangles stay convex.
fn rounded_rect_path(shape: &Shape, radius: f32) -> BezPath {
    let (min_x, min_y, max_x, max_y) = normalize_rect(shape.x1, shape.y1, shape.x2, shape.y2);
    let rect = Rect::new(min_x as f64, min_y as f64, max_x as f64, max_y as f64);
    let r = (radius as f64).min(rect.width() / 2.0).min(rect.height() / 2.0);
    rect.to_rounded_rect(r).to_path(PATH_TOLERANCE)
}

fn paint_filled(surface: &mut dyn Surface, shape: &Shape, path: &BezPath, color: Color, width: f64) {
    if let Some(fill) = shape.fill {
        surface.fill_path(path, fill.with_alpha(shape.opacity));
    }
    surface.stroke_path(path, color, width);
}
