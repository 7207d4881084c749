//! Hit testing: point → shape lookup.
//!
//! Scans the store top to bottom (last painted = topmost) and reports the
//! first shape whose kind-specific predicate accepts the point. A miss is
//! `None`, never an error.

use crate::surface::TextMeasure;
use ink_core::geometry::{
    diameter_circle, distance, distance_to_segment, normalize_rect, point_in_circle,
    point_in_rect, point_near_polyline,
};
use ink_core::{CanvasConfig, Shape, ShapeId, ShapeKind, ShapeStore};

/// Find the topmost shape at `(px, py)` using per-kind predicates.
pub fn hit_test(
    store: &ShapeStore,
    px: f32,
    py: f32,
    config: &CanvasConfig,
    measure: &dyn TextMeasure,
) -> Option<ShapeId> {
    let hit = store
        .iter_topmost()
        .find(|s| shape_contains(s, px, py, config, measure))
        .map(|s| s.id);
    log::trace!("hit_test ({px}, {py}) -> {hit:?}");
    hit
}

/// Find the topmost text shape at `(px, py)`.
pub fn hit_test_text(
    store: &ShapeStore,
    px: f32,
    py: f32,
    config: &CanvasConfig,
    measure: &dyn TextMeasure,
) -> Option<ShapeId> {
    store
        .iter_topmost()
        .filter(|s| matches!(s.kind, ShapeKind::Text { .. }))
        .find(|s| shape_contains(s, px, py, config, measure))
        .map(|s| s.id)
}

/// Kind-specific containment used by the pointer tool.
///
/// - line, arrow, pencil: within `hit_tolerance` of the stroke
/// - rectangle: inside the normalized bounding box
/// - circle: within half the diameter of the midpoint
/// - text: inside the measured text box
pub fn shape_contains(
    shape: &Shape,
    px: f32,
    py: f32,
    config: &CanvasConfig,
    measure: &dyn TextMeasure,
) -> bool {
    match &shape.kind {
        ShapeKind::Line | ShapeKind::Arrow => {
            distance_to_segment(px, py, shape.x1, shape.y1, shape.x2, shape.y2)
                <= config.hit_tolerance
        }
        ShapeKind::Pencil { points } => point_near_polyline(px, py, points, config.hit_tolerance),
        ShapeKind::Rectangle => point_in_rect(px, py, shape.x1, shape.y1, shape.x2, shape.y2),
        ShapeKind::Circle => point_in_circle(px, py, shape.x1, shape.y1, shape.x2, shape.y2),
        ShapeKind::Text { .. } => match text_bounds(shape, config, measure) {
            Some((x1, y1, x2, y2)) => point_in_rect(px, py, x1, y1, x2, y2),
            None => false,
        },
    }
}

/// Distance from `(px, py)` to the shape's geometry; 0 inside filled areas.
pub fn shape_distance(
    shape: &Shape,
    px: f32,
    py: f32,
    config: &CanvasConfig,
    measure: &dyn TextMeasure,
) -> f32 {
    match &shape.kind {
        ShapeKind::Line | ShapeKind::Arrow => {
            distance_to_segment(px, py, shape.x1, shape.y1, shape.x2, shape.y2)
        }
        ShapeKind::Pencil { points } => match points.as_slice() {
            [] => f32::INFINITY,
            [(x, y)] => distance(px, py, *x, *y),
            _ => points
                .windows(2)
                .map(|w| distance_to_segment(px, py, w[0].0, w[0].1, w[1].0, w[1].1))
                .fold(f32::INFINITY, f32::min),
        },
        ShapeKind::Rectangle => distance_to_box(px, py, shape.x1, shape.y1, shape.x2, shape.y2),
        ShapeKind::Circle => {
            let ((cx, cy), r) = diameter_circle(shape.x1, shape.y1, shape.x2, shape.y2);
            (distance(px, py, cx, cy) - r).max(0.0)
        }
        ShapeKind::Text { .. } => match text_bounds(shape, config, measure) {
            Some((x1, y1, x2, y2)) => distance_to_box(px, py, x1, y1, x2, y2),
            None => f32::INFINITY,
        },
    }
}

/// Topmost shape whose anchor 1 lies within `radius` of `(px, py)`.
pub fn hit_test_anchor(store: &ShapeStore, px: f32, py: f32, radius: f32) -> Option<ShapeId> {
    store
        .iter_topmost()
        .find(|s| distance(px, py, s.x1, s.y1) <= radius)
        .map(|s| s.id)
}

/// Shape whose anchor 1 is nearest to `(px, py)`, if within `radius`.
/// Ties resolve to the topmost shape.
pub fn nearest_anchor(store: &ShapeStore, px: f32, py: f32, radius: f32) -> Option<ShapeId> {
    let mut best: Option<(f32, ShapeId)> = None;
    for s in store.iter_topmost() {
        let d = distance(px, py, s.x1, s.y1);
        if d <= radius && best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, s.id));
        }
    }
    best.map(|(_, id)| id)
}

/// Topmost shape whose geometry lies within `radius` of `(px, py)`.
pub fn hit_test_within(
    store: &ShapeStore,
    px: f32,
    py: f32,
    radius: f32,
    config: &CanvasConfig,
    measure: &dyn TextMeasure,
) -> Option<ShapeId> {
    store
        .iter_topmost()
        .find(|s| shape_distance(s, px, py, config, measure) <= radius)
        .map(|s| s.id)
}

/// Canvas-space box `(min_x, min_y, max_x, max_y)` of a text shape.
///
/// The anchor is the first line's baseline. The box starts one line height
/// (`text_base_px × scale`) above it, spans the widest measured line, and
/// grows by `text_line_height × font` per extra line.
pub fn text_bounds(
    shape: &Shape,
    config: &CanvasConfig,
    measure: &dyn TextMeasure,
) -> Option<(f32, f32, f32, f32)> {
    let ShapeKind::Text { text, text_width, .. } = &shape.kind else {
        return None;
    };
    let font_px = config.font_px(*text_width, 1.0);
    let line_count = text.split('\n').count();
    let width = text
        .split('\n')
        .map(|line| measure.line_width(line, font_px))
        .fold(0.0, f32::max);
    let top = shape.y1 - font_px;
    let bottom = shape.y1 + (line_count - 1) as f32 * font_px * config.text_line_height;
    Some((shape.x1, top, shape.x1 + width, bottom))
}

fn distance_to_box(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let (min_x, min_y, max_x, max_y) = normalize_rect(x1, y1, x2, y2);
    let dx = (min_x - px).max(0.0).max(px - max_x);
    let dy = (min_y - py).max(0.0).max(py - max_y);
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ApproxMeasure;
    use ink_core::DrawStyle;

    fn shape(kind: ShapeKind, x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
        let mut s = Shape::new(kind, x1, y1, &DrawStyle::default());
        s.set_anchor2(x2, y2);
        s
    }

    fn text(content: &str, x: f32, y: f32) -> Shape {
        let kind = ShapeKind::Text {
            text: content.to_string(),
            text_width: 1.0,
            zoom: 1.0,
        };
        shape(kind, x, y, x, y)
    }

    #[test]
    fn topmost_shape_wins() {
        let config = CanvasConfig::default();
        let mut store = ShapeStore::new();
        let bottom = store.push(shape(ShapeKind::Rectangle, 0.0, 0.0, 100.0, 100.0)).unwrap();
        let top = store.push(shape(ShapeKind::Circle, 40.0, 50.0, 60.0, 50.0)).unwrap();
        let m = ApproxMeasure::default();

        assert_eq!(hit_test(&store, 50.0, 50.0, &config, &m), Some(top));
        assert_eq!(hit_test(&store, 5.0, 5.0, &config, &m), Some(bottom));
        assert_eq!(hit_test(&store, 150.0, 5.0, &config, &m), None);
    }

    #[test]
    fn line_tolerance_is_five() {
        let config = CanvasConfig::default();
        let m = ApproxMeasure::default();
        let l = shape(ShapeKind::Line, 0.0, 0.0, 100.0, 0.0);
        assert!(shape_contains(&l, 50.0, 5.0, &config, &m));
        assert!(!shape_contains(&l, 50.0, 5.5, &config, &m));
    }

    #[test]
    fn text_box_spans_lines() {
        let config = CanvasConfig::default();
        let m = ApproxMeasure::default();
        let t = text("ab\nabcd", 10.0, 50.0);
        let (x1, y1, x2, y2) = text_bounds(&t, &config, &m).unwrap();
        assert_eq!((x1, y1), (10.0, 25.0));
        assert!((x2 - (10.0 + 4.0 * 25.0 * 0.6)).abs() < 1e-3);
        assert!((y2 - 80.0).abs() < 1e-3);
        assert!(shape_contains(&t, 20.0, 40.0, &config, &m));
        assert!(!shape_contains(&t, 20.0, 20.0, &config, &m));
    }

    #[test]
    fn anchor_hit_uses_anchor_one_only() {
        let mut store = ShapeStore::new();
        let id = store.push(shape(ShapeKind::Line, 0.0, 0.0, 200.0, 0.0)).unwrap();
        assert_eq!(hit_test_anchor(&store, 12.0, 16.0, 20.0), Some(id));
        // On the stroke but far from anchor 1.
        assert_eq!(hit_test_anchor(&store, 150.0, 0.0, 20.0), None);
    }

    #[test]
    fn nearest_anchor_prefers_closest() {
        let mut store = ShapeStore::new();
        let near = store.push(shape(ShapeKind::Line, 5.0, 0.0, 50.0, 0.0)).unwrap();
        let _far = store.push(shape(ShapeKind::Line, 15.0, 0.0, 50.0, 0.0)).unwrap();
        assert_eq!(nearest_anchor(&store, 4.0, 0.0, 20.0), Some(near));
        assert_eq!(nearest_anchor(&store, 100.0, 0.0, 20.0), None);
    }

    #[test]
    fn geometry_distance_for_areas() {
        let config = CanvasConfig::default();
        let m = ApproxMeasure::default();
        let r = shape(ShapeKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(shape_distance(&r, 5.0, 5.0, &config, &m), 0.0);
        assert_eq!(shape_distance(&r, 13.0, 14.0, &config, &m), 5.0);
        let c = shape(ShapeKind::Circle, 0.0, 0.0, 20.0, 0.0);
        assert_eq!(shape_distance(&c, 10.0, 25.0, &config, &m), 15.0);
    }
}
