use super::{Tool, ToolContext, ToolKind};
use crate::host::Cursor;
use crate::input::PointerEvent;
use ink_core::{DrawStyle, Shape, ShapeKind};

/// Two-anchor drawing tool: line, arrow, rectangle, or circle.
///
/// `Idle -> Drawing -> Idle`. Pointer-down creates a zero-size transient at
/// the cursor, moves drag anchor 2, pointer-up commits the shape.
pub struct VectorTool {
    kind: ToolKind,
    drawing: Option<Shape>,
}

impl VectorTool {
    /// Returns `None` for kinds that are not two-anchor shapes.
    pub fn new(kind: ToolKind) -> Option<Self> {
        match kind {
            ToolKind::Line | ToolKind::Arrow | ToolKind::Rectangle | ToolKind::Circle => Some(Self {
                kind,
                drawing: None,
            }),
            _ => None,
        }
    }

    pub fn line() -> Self {
        Self { kind: ToolKind::Line, drawing: None }
    }

    pub fn arrow() -> Self {
        Self { kind: ToolKind::Arrow, drawing: None }
    }

    pub fn rectangle() -> Self {
        Self { kind: ToolKind::Rectangle, drawing: None }
    }

    pub fn circle() -> Self {
        Self { kind: ToolKind::Circle, drawing: None }
    }

    fn shape_kind(&self) -> ShapeKind {
        match self.kind {
            ToolKind::Arrow => ShapeKind::Arrow,
            ToolKind::Rectangle => ShapeKind::Rectangle,
            ToolKind::Circle => ShapeKind::Circle,
            _ => ShapeKind::Line,
        }
    }
}

impl Tool for VectorTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        _cx: &mut ToolContext<'_>,
    ) -> bool {
        if self.drawing.is_some() {
            return false;
        }
        self.drawing = Some(Shape::new(self.shape_kind(), event.x, event.y, style));
        true
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, cx: &mut ToolContext<'_>) -> bool {
        let Some(shape) = self.drawing.as_mut() else {
            return false;
        };
        shape.set_anchor2(event.x, event.y);
        cx.redraw();
        true
    }

    fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        _style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool {
        let Some(mut shape) = self.drawing.take() else {
            return false;
        };
        shape.set_anchor2(event.x, event.y);
        cx.commit(shape);
        true
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn is_active(&self) -> bool {
        self.drawing.is_some()
    }

    fn deactivate(&mut self, cx: &mut ToolContext<'_>) {
        if self.drawing.take().is_some() {
            cx.redraw();
        }
    }

    fn transient(&self) -> Option<&Shape> {
        self.drawing.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{TestHost, at, cx};
    use ink_core::{CanvasConfig, Color, ShapeStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn gesture_commits_exact_anchors() {
        let config = CanvasConfig::default();
        for mut tool in [VectorTool::line(), VectorTool::arrow(), VectorTool::rectangle(), VectorTool::circle()] {
            let mut store = ShapeStore::new();
            let mut host = TestHost::default();
            let style = DrawStyle::new(Color::WHITE, 2.0);
            let mut c = cx(&mut store, &mut host, &config);

            assert!(tool.on_pointer_down(&at(3.0, 4.0), &style, &mut c));
            assert_eq!(tool.transient().map(|s| s.anchor2()), Some((3.0, 4.0)));
            assert!(tool.on_pointer_move(&at(20.0, 30.0), &mut c));
            assert!(tool.on_pointer_up(&at(40.0, 50.0), &style, &mut c));

            assert_eq!(host.saves, 1);
            assert_eq!(store.len(), 1);
            let s = store.iter().next().unwrap();
            assert_eq!((s.x1, s.y1, s.x2, s.y2), (3.0, 4.0, 40.0, 50.0));
            assert_eq!(s.kind.name(), tool.kind().name());
            assert!(tool.transient().is_none());
        }
    }

    #[test]
    fn move_and_up_without_down_are_noops() {
        let config = CanvasConfig::default();
        let mut store = ShapeStore::new();
        let mut host = TestHost::default();
        let mut tool = VectorTool::rectangle();
        let mut c = cx(&mut store, &mut host, &config);

        assert!(!tool.on_pointer_move(&at(1.0, 1.0), &mut c));
        assert!(!tool.on_pointer_up(&at(1.0, 1.0), &DrawStyle::default(), &mut c));
        assert_eq!(host.saves, 0);
        assert_eq!(host.redraws, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn second_down_does_not_restart() {
        let config = CanvasConfig::default();
        let mut store = ShapeStore::new();
        let mut host = TestHost::default();
        let mut tool = VectorTool::line();
        let mut c = cx(&mut store, &mut host, &config);
        let style = DrawStyle::default();

        tool.on_pointer_down(&at(0.0, 0.0), &style, &mut c);
        assert!(!tool.on_pointer_down(&at(9.0, 9.0), &style, &mut c));
        assert_eq!(tool.transient().map(|s| s.anchor1()), Some((0.0, 0.0)));
    }

    #[test]
    fn only_two_anchor_kinds_construct() {
        assert!(VectorTool::new(ToolKind::Circle).is_some());
        assert!(VectorTool::new(ToolKind::Eraser).is_none());
    }
}
