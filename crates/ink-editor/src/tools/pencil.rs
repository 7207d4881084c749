use super::{Tool, ToolContext, ToolKind};
use crate::host::Cursor;
use crate::input::PointerEvent;
use ink_core::{DrawStyle, PointRun, Shape, ShapeKind};

/// Freehand stroke tool.
///
/// Samples are appended on every move (exact repeats are skipped); anchor 1
/// stays on the first sample and anchor 2 follows the last.
#[derive(Default)]
pub struct PencilTool {
    stroke: Option<Shape>,
}

impl PencilTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for PencilTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pencil
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        _cx: &mut ToolContext<'_>,
    ) -> bool {
        if self.stroke.is_some() {
            return false;
        }
        let mut points = PointRun::new();
        points.push(event.position());
        self.stroke = Some(Shape::new(ShapeKind::Pencil { points }, event.x, event.y, style));
        true
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, cx: &mut ToolContext<'_>) -> bool {
        let Some(shape) = self.stroke.as_mut() else {
            return false;
        };
        if let ShapeKind::Pencil { points } = &mut shape.kind
            && points.last() != Some(&event.position())
        {
            points.push(event.position());
            shape.set_anchor2(event.x, event.y);
            cx.redraw();
        }
        true
    }

    fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        _style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool {
        let Some(mut shape) = self.stroke.take() else {
            return false;
        };
        if let ShapeKind::Pencil { points } = &mut shape.kind
            && points.last() != Some(&event.position())
        {
            points.push(event.position());
            shape.set_anchor2(event.x, event.y);
        }
        cx.commit(shape);
        true
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn is_active(&self) -> bool {
        self.stroke.is_some()
    }

    fn deactivate(&mut self, cx: &mut ToolContext<'_>) {
        if self.stroke.take().is_some() {
            cx.redraw();
        }
    }

    fn transient(&self) -> Option<&Shape> {
        self.stroke.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{TestHost, at, cx};
    use ink_core::{CanvasConfig, ShapeStore};

    #[test]
    fn stroke_collects_samples() {
        let config = CanvasConfig::default();
        let mut store = ShapeStore::new();
        let mut host = TestHost::default();
        let mut tool = PencilTool::new();
        let style = DrawStyle::default();
        let mut c = cx(&mut store, &mut host, &config);

        tool.on_pointer_down(&at(0.0, 0.0), &style, &mut c);
        tool.on_pointer_move(&at(5.0, 1.0), &mut c);
        tool.on_pointer_move(&at(5.0, 1.0), &mut c);
        tool.on_pointer_move(&at(9.0, 4.0), &mut c);
        tool.on_pointer_up(&at(9.0, 4.0), &style, &mut c);

        assert_eq!(host.saves, 1);
        let s = store.iter().next().unwrap();
        match &s.kind {
            ShapeKind::Pencil { points } => {
                assert_eq!(points.as_slice(), &[(0.0, 0.0), (5.0, 1.0), (9.0, 4.0)]);
            }
            _ => panic!("expected pencil"),
        }
        assert_eq!((s.x1, s.y1, s.x2, s.y2), (0.0, 0.0, 9.0, 4.0));
    }

    #[test]
    fn click_commits_a_dot() {
        let config = CanvasConfig::default();
        let mut store = ShapeStore::new();
        let mut host = TestHost::default();
        let mut tool = PencilTool::new();
        let style = DrawStyle::default();
        let mut c = cx(&mut store, &mut host, &config);

        tool.on_pointer_down(&at(7.0, 7.0), &style, &mut c);
        tool.on_pointer_up(&at(7.0, 7.0), &style, &mut c);
        assert_eq!(store.len(), 1);
    }
}
