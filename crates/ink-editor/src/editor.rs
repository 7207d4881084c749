//! The editor dispatcher.
//!
//! [`Editor`] owns the committed shapes and one instance of every tool.
//! Host events go to the active tool together with a fresh
//! [`ToolContext`]; [`Editor::render`] replays the store and the active
//! tool's feedback onto any [`Surface`].

use crate::animation::{AnimationStep, MoveAnimation};
use crate::host::CanvasHost;
use crate::input::{InputEvent, Modifiers, PointerEvent};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{
    EraserTool, PencilTool, PointerTool, TextTool, Tool, ToolContext, ToolKind, VectorTool,
};
use ink_core::{CanvasConfig, DrawStyle, ShapeId, ShapeStore};
use ink_render::Surface;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
const ZOOM_STEP: f32 = 1.25;

/// One instance of every tool; only the active one sees events.
struct Toolbox {
    pointer: PointerTool,
    line: VectorTool,
    arrow: VectorTool,
    rectangle: VectorTool,
    circle: VectorTool,
    pencil: PencilTool,
    eraser: EraserTool,
    text: TextTool,
}

impl Toolbox {
    fn new() -> Self {
        Self {
            pointer: PointerTool::new(),
            line: VectorTool::line(),
            arrow: VectorTool::arrow(),
            rectangle: VectorTool::rectangle(),
            circle: VectorTool::circle(),
            pencil: PencilTool::new(),
            eraser: EraserTool::new(),
            text: TextTool::new(),
        }
    }

    fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Pointer => &self.pointer,
            ToolKind::Line => &self.line,
            ToolKind::Arrow => &self.arrow,
            ToolKind::Rectangle => &self.rectangle,
            ToolKind::Circle => &self.circle,
            ToolKind::Pencil => &self.pencil,
            ToolKind::Eraser => &self.eraser,
            ToolKind::Text => &self.text,
        }
    }

    fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Pointer => &mut self.pointer,
            ToolKind::Line => &mut self.line,
            ToolKind::Arrow => &mut self.arrow,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::Circle => &mut self.circle,
            ToolKind::Pencil => &mut self.pencil,
            ToolKind::Eraser => &mut self.eraser,
            ToolKind::Text => &mut self.text,
        }
    }
}

pub struct Editor {
    store: ShapeStore,
    config: CanvasConfig,
    zoom: f32,
    active_tool: ToolKind,
    /// Tool to return to on Tab.
    prev_tool: ToolKind,
    tools: Toolbox,
    animation: Option<MoveAnimation>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Editor {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            store: ShapeStore::new(),
            config,
            zoom: 1.0,
            active_tool: ToolKind::Pointer,
            prev_tool: ToolKind::Pointer,
            tools: Toolbox::new(),
            animation: None,
        }
    }

    // ── Accessors ──

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn is_text_editing(&self) -> bool {
        self.tools.text.is_editing()
    }

    /// Whether the active tool has a gesture or edit in progress.
    pub fn is_busy(&self) -> bool {
        self.tools.get(self.active_tool).is_active()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Swap in a whole new set of shapes (e.g. a restored snapshot).
    /// Any in-progress gesture is settled first.
    pub fn replace_shapes(&mut self, store: ShapeStore, host: &mut dyn CanvasHost) {
        self.settle(host);
        self.animation = None;
        log::debug!("replace store: {} shapes", store.len());
        self.store = store;
        host.redraw();
    }

    /// Set the zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32, host: &mut dyn CanvasHost) {
        if !zoom.is_finite() {
            log::warn!("ignoring zoom {zoom}");
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        host.redraw();
    }

    // ── Pointer events ──

    pub fn pointer_down(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        host: &mut dyn CanvasHost,
    ) -> bool {
        if let Some(mut anim) = self.animation.take() {
            anim.cancel();
            log::debug!("pointer down cancels animation of {}", anim.id());
        }
        let handled = self.with_tool(host, |tool, cx| tool.on_pointer_down(event, style, cx));
        self.sync_cursor(host);
        handled
    }

    pub fn pointer_move(&mut self, event: &PointerEvent, host: &mut dyn CanvasHost) -> bool {
        self.with_tool(host, |tool, cx| tool.on_pointer_move(event, cx))
    }

    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        host: &mut dyn CanvasHost,
    ) -> bool {
        let handled = self.with_tool(host, |tool, cx| tool.on_pointer_up(event, style, cx));
        self.sync_cursor(host);
        handled
    }

    /// Route a normalized input event.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        style: &DrawStyle,
        host: &mut dyn CanvasHost,
    ) -> bool {
        match event {
            InputEvent::PointerDown(p) => self.pointer_down(p, style, host),
            InputEvent::PointerMove(p) => self.pointer_move(p, host),
            InputEvent::PointerUp(p) => self.pointer_up(p, style, host),
            InputEvent::Key { key, modifiers } => self.key(key, *modifiers, host),
        }
    }

    // ── Keyboard and tools ──

    /// Handle a key press. While a text edit is open, keys go to the
    /// overlay handling and shortcuts are suppressed.
    pub fn key(&mut self, key: &str, modifiers: Modifiers, host: &mut dyn CanvasHost) -> bool {
        if self.is_text_editing() {
            let mut cx = ToolContext {
                store: &mut self.store,
                host,
                config: &self.config,
                zoom: self.zoom,
            };
            return self.tools.text.key(key, modifiers.shift, &mut cx);
        }
        match ShortcutMap::resolve(key, modifiers) {
            Some(action) => self.dispatch_action(action, host),
            None => false,
        }
    }

    /// Switch tools. The outgoing tool settles its gesture first.
    pub fn set_tool(&mut self, kind: ToolKind, host: &mut dyn CanvasHost) {
        if kind != self.active_tool {
            self.settle(host);
            self.prev_tool = self.active_tool;
            self.active_tool = kind;
            log::debug!("tool: {} -> {}", self.prev_tool, kind);
        }
        self.sync_cursor(host);
    }

    /// Toggle between the current and previous tool.
    pub fn toggle_last_tool(&mut self, host: &mut dyn CanvasHost) {
        self.set_tool(self.prev_tool, host);
    }

    // ── Text overlay outcomes ──

    pub fn text_commit(&mut self, text: &str, host: &mut dyn CanvasHost) -> bool {
        let mut cx = ToolContext {
            store: &mut self.store,
            host,
            config: &self.config,
            zoom: self.zoom,
        };
        self.tools.text.commit(text, &mut cx)
    }

    pub fn text_cancel(&mut self, host: &mut dyn CanvasHost) -> bool {
        let mut cx = ToolContext {
            store: &mut self.store,
            host,
            config: &self.config,
            zoom: self.zoom,
        };
        self.tools.text.cancel(&mut cx)
    }

    pub fn text_blur(&mut self, text: &str, host: &mut dyn CanvasHost) -> bool {
        let mut cx = ToolContext {
            store: &mut self.store,
            host,
            config: &self.config,
            zoom: self.zoom,
        };
        self.tools.text.blur(text, &mut cx)
    }

    // ── Animation ──

    /// Start moving a shape's anchor 1 to `target` over the configured
    /// duration. Replaces any running animation.
    pub fn animate_move(&mut self, id: ShapeId, target: (f32, f32)) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        if let Some(mut old) = self.animation.take() {
            old.cancel();
        }
        self.animation = Some(MoveAnimation::new(id, target, self.config.animation_ms));
        true
    }

    /// Advance the running animation. Returns `true` while more frames are
    /// needed.
    pub fn tick(&mut self, now_ms: f64, host: &mut dyn CanvasHost) -> bool {
        let Some(anim) = self.animation.as_mut() else {
            return false;
        };
        match anim.step(now_ms, &mut self.store) {
            AnimationStep::Running => {
                host.redraw();
                true
            }
            AnimationStep::Finished => {
                self.animation = None;
                host.redraw();
                host.save_state(&self.store);
                false
            }
            AnimationStep::Cancelled => {
                self.animation = None;
                false
            }
        }
    }

    // ── Rendering ──

    /// Clear the surface, replay the committed shapes, then the active
    /// tool's transient shape and overlay.
    pub fn render(&self, surface: &mut dyn Surface) {
        let tool = self.tools.get(self.active_tool);
        surface.clear();
        for shape in self.store.iter() {
            tool.render_committed(surface, shape, self.zoom, &self.config);
        }
        tool.render_overlay(surface, &self.store, self.zoom, &self.config);
    }

    // ── Internals ──

    fn with_tool<R>(
        &mut self,
        host: &mut dyn CanvasHost,
        f: impl FnOnce(&mut dyn Tool, &mut ToolContext<'_>) -> R,
    ) -> R {
        let tool = self.tools.get_mut(self.active_tool);
        let mut cx = ToolContext {
            store: &mut self.store,
            host,
            config: &self.config,
            zoom: self.zoom,
        };
        f(tool, &mut cx)
    }

    fn settle(&mut self, host: &mut dyn CanvasHost) {
        self.with_tool(host, |tool, cx| tool.deactivate(cx));
    }

    fn sync_cursor(&self, host: &mut dyn CanvasHost) {
        host.set_cursor(self.tools.get(self.active_tool).cursor());
    }

    fn dispatch_action(&mut self, action: ShortcutAction, host: &mut dyn CanvasHost) -> bool {
        match action {
            ShortcutAction::Tool(kind) => self.set_tool(kind, host),
            ShortcutAction::ToggleLastTool => self.toggle_last_tool(host),
            ShortcutAction::ZoomIn => self.set_zoom(self.zoom * ZOOM_STEP, host),
            ShortcutAction::ZoomOut => self.set_zoom(self.zoom / ZOOM_STEP, host),
            ShortcutAction::ZoomReset => self.set_zoom(1.0, host),
            ShortcutAction::Cancel => {
                if !self.is_busy() {
                    return false;
                }
                self.settle(host);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::TestHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn tab_toggles_between_last_two_tools() {
        let mut editor = Editor::default();
        let mut host = TestHost::default();
        editor.key("r", Modifiers::NONE, &mut host);
        editor.key("e", Modifiers::NONE, &mut host);
        assert_eq!(editor.active_tool(), ToolKind::Eraser);
        editor.key("Tab", Modifiers::NONE, &mut host);
        assert_eq!(editor.active_tool(), ToolKind::Rectangle);
        editor.key("Tab", Modifiers::NONE, &mut host);
        assert_eq!(editor.active_tool(), ToolKind::Eraser);
    }

    #[test]
    fn switching_tools_drops_transient_shape() {
        let mut editor = Editor::default();
        let mut host = TestHost::default();
        let style = DrawStyle::default();
        editor.set_tool(ToolKind::Line, &mut host);
        editor.pointer_down(&PointerEvent::at(0.0, 0.0), &style, &mut host);
        assert!(editor.is_busy());

        editor.set_tool(ToolKind::Pointer, &mut host);
        editor.set_tool(ToolKind::Line, &mut host);
        assert!(!editor.is_busy());
        assert!(!editor.pointer_up(&PointerEvent::at(5.0, 5.0), &style, &mut host));
        assert!(editor.store().is_empty());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut editor = Editor::default();
        let mut host = TestHost::default();
        editor.set_zoom(100.0, &mut host);
        assert_eq!(editor.zoom(), MAX_ZOOM);
        editor.set_zoom(f32::NAN, &mut host);
        assert_eq!(editor.zoom(), MAX_ZOOM);
        editor.key("0", Modifiers { ctrl: true, ..Modifiers::NONE }, &mut host);
        assert_eq!(editor.zoom(), 1.0);
    }

    #[test]
    fn animation_checkpoints_once_on_finish() {
        let mut editor = Editor::default();
        let mut host = TestHost::default();
        let style = DrawStyle::default();
        editor.set_tool(ToolKind::Rectangle, &mut host);
        editor.pointer_down(&PointerEvent::at(0.0, 0.0), &style, &mut host);
        editor.pointer_up(&PointerEvent::at(10.0, 10.0), &style, &mut host);
        let id = editor.store().iter().next().unwrap().id;
        assert_eq!(host.saves, 1);

        assert!(editor.animate_move(id, (50.0, 50.0)));
        assert!(editor.tick(0.0, &mut host));
        assert!(editor.tick(50.0, &mut host));
        assert!(!editor.tick(100.0, &mut host));
        assert!(!editor.is_animating());
        assert_eq!(host.saves, 2);
        assert_eq!(editor.store().get(id).unwrap().anchor2(), (60.0, 60.0));
    }

    #[test]
    fn pointer_down_cancels_animation() {
        let mut editor = Editor::default();
        let mut host = TestHost::default();
        let style = DrawStyle::default();
        editor.set_tool(ToolKind::Circle, &mut host);
        editor.pointer_down(&PointerEvent::at(0.0, 0.0), &style, &mut host);
        editor.pointer_up(&PointerEvent::at(10.0, 0.0), &style, &mut host);
        let id = editor.store().iter().next().unwrap().id;

        editor.animate_move(id, (100.0, 0.0));
        editor.tick(0.0, &mut host);
        editor.pointer_down(&PointerEvent::at(400.0, 400.0), &style, &mut host);
        assert!(!editor.is_animating());
        assert!(!editor.tick(200.0, &mut host));
        assert_eq!(editor.store().get(id).unwrap().anchor1(), (0.0, 0.0));
    }

    #[test]
    fn shortcuts_suppressed_while_editing_text() {
        let mut editor = Editor::default();
        let mut host = TestHost::default();
        editor.set_tool(ToolKind::Text, &mut host);
        editor.pointer_down(&PointerEvent::at(10.0, 10.0), &DrawStyle::default(), &mut host);
        assert!(editor.is_text_editing());

        assert!(!editor.key("r", Modifiers::NONE, &mut host));
        assert_eq!(editor.active_tool(), ToolKind::Text);
        assert!(editor.key("Escape", Modifiers::NONE, &mut host));
        assert!(!editor.is_text_editing());
        assert!(editor.key("r", Modifiers::NONE, &mut host));
        assert_eq!(editor.active_tool(), ToolKind::Rectangle);
    }
}
