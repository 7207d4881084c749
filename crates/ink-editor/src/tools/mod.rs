//! Tool system for canvas interactions.
//!
//! Each tool owns only per-gesture state. Committed shapes live in the
//! [`ShapeStore`] handed in through [`ToolContext`] on every call, together
//! with the host callbacks and the active configuration.
//!
//! | Tool | Down | Move | Up |
//! |------|------|------|----|
//! | Line / Arrow / Rectangle / Circle | start transient | drag anchor 2 | commit + checkpoint |
//! | Pencil | start stroke | append sample | commit + checkpoint |
//! | Eraser | remove topmost near cursor + checkpoint | hover preview | — |
//! | Pointer | select topmost hit | translate selection | checkpoint |
//! | Text | open overlay / re-edit | — | — |

mod eraser;
mod pencil;
mod pointer;
mod text;
mod vector;

pub use eraser::EraserTool;
pub use pencil::PencilTool;
pub use pointer::PointerTool;
pub use text::TextTool;
pub use vector::VectorTool;

use crate::host::{CanvasHost, Cursor, HostMeasure};
use crate::input::PointerEvent;
use ink_core::{CanvasConfig, DrawStyle, Shape, ShapeId, ShapeStore};
use ink_render::{Surface, paint_shape};
use std::fmt;
use std::str::FromStr;

/// The active tool determines how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pointer,
    Line,
    Arrow,
    Rectangle,
    Circle,
    Pencil,
    Eraser,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Pointer,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Pencil => "pencil",
            Self::Eraser => "eraser",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pointer" | "select" => Ok(Self::Pointer),
            "line" => Ok(Self::Line),
            "arrow" => Ok(Self::Arrow),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" | "ellipse" => Ok(Self::Circle),
            "pencil" | "pen" => Ok(Self::Pencil),
            "eraser" => Ok(Self::Eraser),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

/// Everything a tool may touch during one event.
pub struct ToolContext<'a> {
    pub store: &'a mut ShapeStore,
    pub host: &'a mut dyn CanvasHost,
    pub config: &'a CanvasConfig,
    pub zoom: f32,
}

impl ToolContext<'_> {
    pub fn redraw(&mut self) {
        self.host.redraw();
    }

    pub fn checkpoint(&mut self) {
        self.host.save_state(self.store);
    }

    /// Append a finished shape, repaint, and checkpoint.
    /// An invalid shape is logged and dropped.
    pub fn commit(&mut self, shape: Shape) -> Option<ShapeId> {
        match self.store.push(shape) {
            Ok(id) => {
                log::debug!("commit {id} ({} shapes)", self.store.len());
                self.redraw();
                self.checkpoint();
                Some(id)
            }
            Err(e) => {
                log::warn!("dropping shape: {e}");
                self.redraw();
                None
            }
        }
    }

    /// Remove a committed shape, repaint, and checkpoint.
    pub fn erase(&mut self, id: ShapeId) -> bool {
        if self.store.remove(id).is_none() {
            return false;
        }
        log::debug!("erase {id} ({} shapes)", self.store.len());
        self.redraw();
        self.checkpoint();
        true
    }

    /// Text measurement through the host, with the configured fallback.
    pub fn measure(&self) -> HostMeasure<'_> {
        HostMeasure::new(&*self.host, self.config)
    }
}

/// Interaction contract shared by every tool.
///
/// `handled` return values tell the host whether the event was consumed.
/// Move and up events without a preceding down are no-ops returning `false`.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool;

    fn on_pointer_move(&mut self, event: &PointerEvent, cx: &mut ToolContext<'_>) -> bool;

    fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool;

    fn cursor(&self) -> Cursor;

    /// Whether a gesture (or text edit) is in progress.
    fn is_active(&self) -> bool;

    /// Settle any in-progress gesture because the tool is being switched away.
    fn deactivate(&mut self, _cx: &mut ToolContext<'_>) {}

    /// The in-progress shape, painted over the committed store.
    fn transient(&self) -> Option<&Shape> {
        None
    }

    /// Paint one committed shape.
    fn render_committed(
        &self,
        surface: &mut dyn Surface,
        shape: &Shape,
        zoom: f32,
        config: &CanvasConfig,
    ) {
        paint_shape(surface, shape, zoom, config);
    }

    /// Paint tool feedback above the committed shapes.
    fn render_overlay(
        &self,
        surface: &mut dyn Surface,
        _store: &ShapeStore,
        zoom: f32,
        config: &CanvasConfig,
    ) {
        if let Some(shape) = self.transient() {
            paint_shape(surface, shape, zoom, config);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording host shared by the tool unit tests.

    use super::*;
    use crate::host::{TextEditRequest, TextEditSurface};

    #[derive(Default)]
    pub struct Overlay {
        pub open: Option<TextEditRequest>,
        pub content: String,
    }

    impl TextEditSurface for Overlay {
        fn begin(&mut self, request: &TextEditRequest) {
            self.content = request.initial_text.clone();
            self.open = Some(request.clone());
        }

        fn end(&mut self) {
            self.open = None;
        }

        fn content(&self) -> String {
            self.content.clone()
        }
    }

    #[derive(Default)]
    pub struct TestHost {
        pub redraws: usize,
        pub saves: usize,
        pub overlay: Overlay,
    }

    impl CanvasHost for TestHost {
        fn redraw(&mut self) {
            self.redraws += 1;
        }

        fn save_state(&mut self, _store: &ShapeStore) {
            self.saves += 1;
        }

        fn text_overlay(&mut self) -> Option<&mut dyn TextEditSurface> {
            Some(&mut self.overlay)
        }
    }

    pub fn cx<'a>(
        store: &'a mut ShapeStore,
        host: &'a mut TestHost,
        config: &'a CanvasConfig,
    ) -> ToolContext<'a> {
        ToolContext {
            store,
            host,
            config,
            zoom: 1.0,
        }
    }

    pub fn at(x: f32, y: f32) -> PointerEvent {
        PointerEvent::at(x, y)
    }
}
