//! Pure 2D geometry used by hit testing and painting.

/// Euclidean distance between two points.
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x2 - x1).hypot(y2 - y1)
}

/// Distance from `(px, py)` to the segment `(x1, y1)`–`(x2, y2)`.
///
/// A degenerate segment (both endpoints equal) reduces to point distance.
pub fn distance_to_segment(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(px, py, x1, y1);
    }
    let t = (((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(px, py, x1 + t * dx, y1 + t * dy)
}

/// Normalize two opposite corners into `(min_x, min_y, max_x, max_y)`.
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    (x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
}

/// Axis-aligned containment, independent of corner order.
pub fn point_in_rect(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
    let (min_x, min_y, max_x, max_y) = normalize_rect(x1, y1, x2, y2);
    px >= min_x && px <= max_x && py >= min_y && py <= max_y
}

/// Center and radius of the circle whose diameter is `(x1, y1)`–`(x2, y2)`.
pub fn diameter_circle(x1: f32, y1: f32, x2: f32, y2: f32) -> ((f32, f32), f32) {
    let center = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    (center, distance(x1, y1, x2, y2) / 2.0)
}

/// Whether `(px, py)` lies inside (or on) the diameter-drag circle.
pub fn point_in_circle(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
    let ((cx, cy), r) = diameter_circle(x1, y1, x2, y2);
    distance(px, py, cx, cy) <= r
}

/// Whether `(px, py)` is within `tolerance` of any segment of the polyline.
/// A single-point polyline is treated as a dot.
pub fn point_near_polyline(px: f32, py: f32, points: &[(f32, f32)], tolerance: f32) -> bool {
    match points {
        [] => false,
        [(x, y)] => distance(px, py, *x, *y) <= tolerance,
        _ => points.windows(2).any(|w| {
            let (a, b) = (w[0], w[1]);
            distance_to_segment(px, py, a.0, a.1, b.0, b.1) <= tolerance
        }),
    }
}
