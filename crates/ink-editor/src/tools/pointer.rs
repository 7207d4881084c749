use super::{Tool, ToolContext, ToolKind};
use crate::host::Cursor;
use crate::input::PointerEvent;
use ink_core::{DrawStyle, ShapeId};
use ink_render::hit::hit_test;

/// Select-and-drag tool. Translation only; anchors never resize here.
#[derive(Default)]
pub struct PointerTool {
    selected: Option<ShapeId>,
    /// Cursor minus anchor 1, fixed for the whole drag.
    drag_offset: (f32, f32),
}

impl PointerTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }
}

impl Tool for PointerTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pointer
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        _style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool {
        let hit = hit_test(&*cx.store, event.x, event.y, cx.config, &cx.measure());
        let Some(shape) = hit.and_then(|id| cx.store.get(id)) else {
            self.selected = None;
            return false;
        };
        self.selected = Some(shape.id);
        self.drag_offset = (event.x - shape.x1, event.y - shape.y1);
        log::debug!("select {}", shape.id);
        true
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, cx: &mut ToolContext<'_>) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(shape) = cx.store.get_mut(id) else {
            // Removed underneath us (e.g. by the host); drop the drag.
            self.selected = None;
            return false;
        };
        let dx = (event.x - self.drag_offset.0) - shape.x1;
        let dy = (event.y - self.drag_offset.1) - shape.y1;
        shape.translate(dx, dy);
        cx.redraw();
        true
    }

    fn on_pointer_up(
        &mut self,
        _event: &PointerEvent,
        _style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool {
        if self.selected.take().is_none() {
            return false;
        }
        cx.redraw();
        cx.checkpoint();
        true
    }

    fn cursor(&self) -> Cursor {
        if self.selected.is_some() {
            Cursor::Move
        } else {
            Cursor::Default
        }
    }

    fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    fn deactivate(&mut self, cx: &mut ToolContext<'_>) {
        if self.selected.take().is_some() {
            cx.checkpoint();
        }
    }
}
