//! Shape data model for Inkflow canvases.
//!
//! A canvas is an ordered list of committed [`Shape`]s. Every shape carries
//! two anchor points whose meaning depends on its [`ShapeKind`]: endpoints for
//! lines and arrows, opposite corners for rectangles, diameter endpoints for
//! circles, the origin for text, and first/last sample for pencil strokes.

use crate::id::ShapeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            let v = (hex_val(bytes[i])? << 4) | hex_val(bytes[i + 1])?;
            Some(v as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as the shortest valid hex string (`#rrggbb` when opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Multiply the alpha channel by `opacity` (clamped to [0, 1]).
    pub fn with_alpha(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba(...)` string for Canvas2D style setters.
    pub fn to_css(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {})", self.a.clamp(0.0, 1.0))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{hex}'")))
    }
}

// ─── Draw style ──────────────────────────────────────────────────────────

/// Ambient drawing configuration resolved by the host for one gesture.
///
/// Tools never read global UI state; the host passes the style it wants
/// applied each time a gesture starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    pub color: Color,
    pub stroke_width: f32,
    pub opacity: f32,
    /// Fill for rectangles and circles. Ignored by other kinds.
    pub fill: Option<Color>,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: 4.0,
            opacity: 1.0,
            fill: None,
        }
    }
}

impl DrawStyle {
    pub fn new(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            stroke_width,
            ..Self::default()
        }
    }

    /// Clamp the style into the range every committed shape must satisfy:
    /// positive finite stroke width and opacity in [0, 1].
    pub fn sanitized(&self) -> Self {
        let stroke_width = if self.stroke_width.is_finite() && self.stroke_width > 0.0 {
            self.stroke_width
        } else {
            log::warn!("invalid stroke width {}, using 1.0", self.stroke_width);
            1.0
        };
        let opacity = if self.opacity.is_nan() {
            1.0
        } else {
            self.opacity.clamp(0.0, 1.0)
        };
        Self {
            stroke_width,
            opacity,
            ..*self
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Sampled points of a freehand stroke.
pub type PointRun = SmallVec<[(f32, f32); 32]>;

/// The closed set of shape kinds, with kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Arrow,
    Rectangle,
    Circle,
    Text {
        text: String,
        /// Font scale factor: stroke width / 4 at creation.
        #[serde(rename = "textWidth")]
        text_width: f32,
        /// Zoom level at which the text was created.
        zoom: f32,
    },
    Pencil {
        points: PointRun,
    },
}

impl ShapeKind {
    /// Lowercase kind tag, also used as the id prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text { .. } => "text",
            Self::Pencil { .. } => "pencil",
        }
    }

    /// Whether the kind paints its `fill` color.
    pub fn supports_fill(&self) -> bool {
        matches!(self, Self::Rectangle | Self::Circle)
    }
}

/// A shape on the canvas (transient while drawn, then committed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(flatten)]
    pub kind: ShapeKind,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Color,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default, rename = "fillColor", skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
}

fn default_opacity() -> f32 {
    1.0
}

impl Shape {
    /// Create a zero-size shape anchored at `(x, y)`.
    ///
    /// The style is sanitized so the shape satisfies the store's invariants.
    pub fn new(kind: ShapeKind, x: f32, y: f32, style: &DrawStyle) -> Self {
        let style = style.sanitized();
        let fill = if kind.supports_fill() { style.fill } else { None };
        Self {
            id: ShapeId::with_prefix(kind.name()),
            kind,
            x1: x,
            y1: y,
            x2: x,
            y2: y,
            color: style.color,
            stroke_width: style.stroke_width,
            opacity: style.opacity,
            fill,
        }
    }

    pub fn anchor1(&self) -> (f32, f32) {
        (self.x1, self.y1)
    }

    pub fn anchor2(&self) -> (f32, f32) {
        (self.x2, self.y2)
    }

    /// Move the second anchor. Only used while the shape is transient.
    pub fn set_anchor2(&mut self, x: f32, y: f32) {
        self.x2 = x;
        self.y2 = y;
    }

    /// Length of the anchor-1 → anchor-2 segment.
    pub fn segment_length(&self) -> f32 {
        crate::geometry::distance(self.x1, self.y1, self.x2, self.y2)
    }

    /// Translate both anchors (and every pencil sample) by the same delta.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
        if let ShapeKind::Pencil { points } = &mut self.kind {
            for p in points.iter_mut() {
                p.0 += dx;
                p.1 += dy;
            }
        }
    }

    /// Text payload, if this is a text shape.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Check the numeric invariants of a committed shape.
    ///
    /// # Errors
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        let coords = [self.x1, self.y1, self.x2, self.y2];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(format!("{}: non-finite anchor", self.id));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(format!(
                "{}: stroke width must be > 0, got {}",
                self.id, self.stroke_width
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(format!(
                "{}: opacity must be in [0, 1], got {}",
                self.id, self.opacity
            ));
        }
        match &self.kind {
            ShapeKind::Text { text_width, zoom, .. } if *text_width <= 0.0 || *zoom <= 0.0 => {
                Err(format!("{}: text scale and zoom must be positive", self.id))
            }
            ShapeKind::Pencil { points } if points.is_empty() => {
                Err(format!("{}: pencil stroke has no points", self.id))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_parsing_variants() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("000000"), Some(Color::BLACK));
        let c = Color::from_hex("#FF000080").unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn hex_emit_is_shortest() {
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        assert_eq!(Color::rgba(1.0, 0.0, 0.0, 0.5).to_hex(), "#ff000080");
    }

    #[test]
    fn sanitize_clamps_style() {
        let style = DrawStyle {
            color: Color::BLACK,
            stroke_width: -2.0,
            opacity: 3.0,
            fill: None,
        };
        let s = style.sanitized();
        assert_eq!(s.stroke_width, 1.0);
        assert_eq!(s.opacity, 1.0);
    }

    #[test]
    fn new_shape_is_zero_size() {
        let s = Shape::new(ShapeKind::Line, 5.0, 6.0, &DrawStyle::default());
        assert_eq!(s.anchor1(), (5.0, 6.0));
        assert_eq!(s.anchor2(), (5.0, 6.0));
        assert_eq!(s.segment_length(), 0.0);
        assert!(s.id.as_str().starts_with("line_"));
    }

    #[test]
    fn fill_dropped_for_unfilled_kinds() {
        let style = DrawStyle {
            fill: Some(Color::WHITE),
            ..DrawStyle::default()
        };
        assert_eq!(Shape::new(ShapeKind::Arrow, 0.0, 0.0, &style).fill, None);
        assert_eq!(
            Shape::new(ShapeKind::Rectangle, 0.0, 0.0, &style).fill,
            Some(Color::WHITE)
        );
    }

    #[test]
    fn translate_moves_pencil_points() {
        let mut points = PointRun::new();
        points.push((1.0, 1.0));
        points.push((4.0, 5.0));
        let mut s = Shape::new(ShapeKind::Pencil { points }, 1.0, 1.0, &DrawStyle::default());
        s.set_anchor2(4.0, 5.0);
        s.translate(10.0, -1.0);
        assert_eq!(s.anchor1(), (11.0, 0.0));
        assert_eq!(s.anchor2(), (14.0, 4.0));
        match &s.kind {
            ShapeKind::Pencil { points } => assert_eq!(points.as_slice(), &[(11.0, 0.0), (14.0, 4.0)]),
            _ => panic!("expected pencil"),
        }
    }

    #[test]
    fn validate_rejects_bad_opacity() {
        let mut s = Shape::new(ShapeKind::Circle, 0.0, 0.0, &DrawStyle::default());
        assert!(s.validate().is_ok());
        s.opacity = 1.5;
        assert!(s.validate().is_err());
    }

    #[test]
    fn serializes_with_type_tag() {
        let style = DrawStyle::new(Color::WHITE, 3.0);
        let s = Shape::new(ShapeKind::Rectangle, 10.0, 10.0, &style);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "rectangle");
        assert_eq!(json["strokeWidth"], 3.0);
        assert_eq!(json["color"], "#ffffff");
        let back: Shape = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
