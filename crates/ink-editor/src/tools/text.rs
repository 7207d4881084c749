use super::{Tool, ToolContext, ToolKind};
use crate::host::{Cursor, TextEditRequest};
use crate::input::PointerEvent;
use ink_core::{DrawStyle, Shape, ShapeKind};
use ink_render::hit::hit_test_text;

/// An open text edit.
#[derive(Debug, Clone)]
struct TextEdit {
    /// Canvas-space anchor the committed shape will get.
    anchor: (f32, f32),
    style: DrawStyle,
    text_width: f32,
    /// Zoom when the edit began, stored on the shape as its creation zoom.
    zoom: f32,
    /// The shape being re-edited and its former z-position.
    original: Option<(usize, Shape)>,
}

#[derive(Debug, Clone, Default)]
enum TextState {
    #[default]
    Idle,
    Editing(TextEdit),
}

/// Text placement and re-editing through the host's overlay.
///
/// `Idle -> Editing -> Idle`. Pointer-down on empty canvas opens a blank
/// overlay; pointer-down on a text shape lifts it out of the store and opens
/// the overlay pre-filled. The overlay outcome comes back through
/// [`TextTool::key`], [`TextTool::commit`], [`TextTool::cancel`] or
/// [`TextTool::blur`].
#[derive(Default)]
pub struct TextTool {
    state: TextState,
}

impl TextTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, TextState::Editing(_))
    }

    /// Key pressed inside the overlay. Enter commits, Shift+Enter is left to
    /// the overlay as a newline, Escape cancels.
    pub fn key(&mut self, key: &str, shift: bool, cx: &mut ToolContext<'_>) -> bool {
        if !self.is_editing() {
            return false;
        }
        match key {
            "Enter" if !shift => {
                let text = overlay_content(cx);
                self.commit(&text, cx)
            }
            "Escape" => self.cancel(cx),
            _ => false,
        }
    }

    /// Finish the edit with `text`. Blank content cancels instead.
    pub fn commit(&mut self, text: &str, cx: &mut ToolContext<'_>) -> bool {
        if text.trim().is_empty() {
            return self.cancel(cx);
        }
        let TextState::Editing(edit) = std::mem::take(&mut self.state) else {
            return false;
        };
        close_overlay(cx);

        let kind = ShapeKind::Text {
            text: text.to_string(),
            text_width: edit.text_width,
            zoom: edit.zoom,
        };
        let mut shape = Shape::new(kind, edit.anchor.0, edit.anchor.1, &edit.style);
        if let Some((_, original)) = &edit.original {
            shape.id = original.id;
        }
        cx.commit(shape).is_some()
    }

    /// Abandon the edit. A re-edited shape goes back where it was.
    pub fn cancel(&mut self, cx: &mut ToolContext<'_>) -> bool {
        let TextState::Editing(edit) = std::mem::take(&mut self.state) else {
            return false;
        };
        close_overlay(cx);
        if let Some((z, original)) = edit.original
            && let Err(e) = cx.store.insert(z, original)
        {
            log::warn!("could not restore text shape: {e}");
        }
        cx.redraw();
        true
    }

    /// Overlay lost focus: commit non-blank content, cancel otherwise.
    pub fn blur(&mut self, text: &str, cx: &mut ToolContext<'_>) -> bool {
        self.commit(text, cx)
    }

    fn begin(&mut self, edit: TextEdit, initial_text: String, cx: &mut ToolContext<'_>) -> bool {
        let baseline = cx.config.text_baseline_offset;
        let request = TextEditRequest {
            x: edit.anchor.0 * cx.zoom,
            y: (edit.anchor.1 - baseline) * cx.zoom,
            font_px: cx.config.font_px(edit.text_width, cx.zoom),
            color: edit.style.color.with_alpha(edit.style.opacity),
            initial_text,
        };
        let Some(overlay) = cx.host.text_overlay() else {
            log::warn!("host has no text overlay; text tool disabled");
            return false;
        };
        overlay.begin(&request);
        log::debug!("text edit at ({}, {})", request.x, request.y);
        self.state = TextState::Editing(edit);
        true
    }
}

fn overlay_content(cx: &mut ToolContext<'_>) -> String {
    cx.host
        .text_overlay()
        .map(|overlay| overlay.content())
        .unwrap_or_default()
}

fn close_overlay(cx: &mut ToolContext<'_>) {
    if let Some(overlay) = cx.host.text_overlay() {
        overlay.end();
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        style: &DrawStyle,
        cx: &mut ToolContext<'_>,
    ) -> bool {
        if self.is_editing() {
            // Clicking away from an open overlay blurs it.
            let text = overlay_content(cx);
            self.blur(&text, cx);
            return true;
        }
        if cx.host.text_overlay().is_none() {
            log::warn!("host has no text overlay; text tool disabled");
            return false;
        }

        let hit = hit_test_text(&*cx.store, event.x, event.y, cx.config, &cx.measure());
        if let Some(id) = hit
            && let Some((z, original)) = cx.store.remove(id)
        {
            let (text, text_width) = match &original.kind {
                ShapeKind::Text { text, text_width, .. } => (text.clone(), *text_width),
                _ => (String::new(), cx.config.text_scale(original.stroke_width)),
            };
            let edit = TextEdit {
                anchor: original.anchor1(),
                style: DrawStyle {
                    color: original.color,
                    stroke_width: original.stroke_width,
                    opacity: original.opacity,
                    fill: None,
                },
                text_width,
                zoom: cx.zoom,
                original: Some((z, original)),
            };
            cx.redraw();
            return self.begin(edit, text, cx);
        }

        let style = style.sanitized();
        let edit = TextEdit {
            anchor: (event.x, event.y + cx.config.text_baseline_offset),
            text_width: cx.config.text_scale(style.stroke_width),
            style,
            zoom: cx.zoom,
            original: None,
        };
        self.begin(edit, String::new(), cx)
    }

    fn on_pointer_move(&mut self, _event: &PointerEvent, _cx: &mut ToolContext<'_>) -> bool {
        false
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
        Cursor::Text
    }

    fn is_active(&self) -> bool {
        self.is_editing()
    }

    fn deactivate(&mut self, cx: &mut ToolContext<'_>) {
        if self.is_editing() {
            let text = overlay_content(cx);
            self.blur(&text, cx);
        }
    }
}
