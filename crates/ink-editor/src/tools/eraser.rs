use super::{Tool, ToolContext, ToolKind};
use crate::host::Cursor;
use crate::input::PointerEvent;
use ink_core::{CanvasConfig, Color, DrawStyle, EraserHitMode, ShapeId, ShapeStore};
use ink_render::hit::{hit_test_anchor, hit_test_within, nearest_anchor, shape_distance};
use ink_render::{Surface, paint_eraser_preview, paint_shape};

/// Outline color for the shape that would be erased.
const HOVER_HIGHLIGHT: Color = Color::rgba(1.0, 0.25, 0.25, 0.5);

/// Click-to-erase tool.
///
/// Each pointer-down removes at most one shape, the topmost within the
/// eraser radius. Moving only updates the hover preview; dragging does not
/// sweep-erase.
#[derive(Default)]
pub struct EraserTool {
    cursor_pos: Option<(f32, f32)>,
    hovered: Option<ShapeId>,
}

impl EraserTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape currently under the eraser, for hover feedback.
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    fn nearest(&self, cx: &ToolContext<'_>, x: f32, y: f32) -> Option<ShapeId> {
        let radius = cx.config.eraser_radius;
        match cx.config.eraser_hit_mode {
            EraserHitMode::Anchor => nearest_anchor(&*cx.store, x, y, radius),
            EraserHitMode::Geometry => {
                let measure = cx.measure();
                let mut best: Option<(f32, ShapeId)> = None;
                for s in cx.store.iter_topmost() {
                    let d = shape_distance(s, x, y, cx.config, &measure);
                    if d <= radius && best.is_none_or(|(bd, _)| d < bd) {
                        best = Some((d, s.id));
                    }
                }
                best.map(|(_, id)| id)
            }
        }
    }

    fn topmost(&self, cx: &ToolContext<'_>, x: f32, y: f32) -> Option<ShapeId> {
        let radius = cx.config.eraser_radius;
        match cx.config.eraser_hit_mode {
            EraserHitMode::Anchor => hit_test_anchor(&*cx.store, x, y, radius),
            EraserHitMode::Geometry => {
                hit_test_within(&*cx.store, x, y, radius, cx.config, &cx.measure())
            }
        }
    }
}

impl Tool for EraserTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Eraser
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        _style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool {
        self.cursor_pos = Some(event.position());
        let Some(id) = self.topmost(cx, event.x, event.y) else {
            return false;
        };
        self.hovered = None;
        cx.erase(id)
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, cx: &mut ToolContext<'_>) -> bool {
        self.cursor_pos = Some(event.position());
        self.hovered = self.nearest(cx, event.x, event.y);
        cx.redraw();
        true
    }

    fn on_pointer_up(
        &mut self,
        _event: &PointerEvent,
        _style: &DrawStyle,
        _cx: &mut ToolContext<'_>,
    ) -> bool {
        false
    }

    fn cursor(&self) -> Cursor {
        Cursor::None
    }

    fn is_active(&self) -> bool {
        false
    }

    fn deactivate(&mut self, cx: &mut ToolContext<'_>) {
        self.cursor_pos = None;
        self.hovered = None;
        cx.redraw();
    }

    fn render_overlay(
        &self,
        surface: &mut dyn Surface,
        store: &ShapeStore,
        zoom: f32,
        config: &CanvasConfig,
    ) {
        if let Some(shape) = self.hovered.and_then(|id| store.get(id)) {
            let mut highlight = shape.clone();
            highlight.color = HOVER_HIGHLIGHT;
            highlight.fill = None;
            highlight.opacity = 1.0;
            paint_shape(surface, &highlight, zoom, config);
        }
        if let Some((x, y)) = self.cursor_pos {
            paint_eraser_preview(surface, x, y, zoom, config);
        }
    }
}
