//! WASM bridge for Inkflow — exposes the drawing engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the `<canvas>`
//! and the text overlay element; everything else lives in Rust.
//!
//! Callbacks registered from JS (`on_save_state`, `set_text_overlay`) must
//! not call back into the same `InkCanvas` synchronously. Repaints are
//! signalled through `needs_redraw()` rather than a callback for the same
//! reason.

mod render2d;

use ink_core::{CanvasConfig, Color, DrawStyle, ShapeStore};
use ink_editor::{
    CanvasHost, Cursor, Editor, Modifiers, PointerEvent, TextEditRequest, TextEditSurface,
    ToolKind,
};
use js_sys::Function;
use render2d::{Canvas2dSurface, FONT_FAMILY};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Overlay element driven through three JS functions.
struct JsOverlay {
    begin: Function,
    end: Function,
    content: Function,
}

impl TextEditSurface for JsOverlay {
    fn begin(&mut self, request: &TextEditRequest) {
        let args = js_sys::Array::new();
        args.push(&JsValue::from_f64(request.x as f64));
        args.push(&JsValue::from_f64(request.y as f64));
        args.push(&JsValue::from_f64(request.font_px as f64));
        args.push(&JsValue::from_str(&request.color.to_css()));
        args.push(&JsValue::from_str(&request.initial_text));
        if let Err(e) = self.begin.apply(&JsValue::NULL, &args) {
            log::warn!("overlay begin failed: {e:?}");
        }
    }

    fn end(&mut self) {
        if let Err(e) = self.end.call0(&JsValue::NULL) {
            log::warn!("overlay end failed: {e:?}");
        }
    }

    fn content(&self) -> String {
        self.content
            .call0(&JsValue::NULL)
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    }
}

/// [`CanvasHost`] backed by JS callbacks.
#[derive(Default)]
struct JsHost {
    dirty: bool,
    cursor: Option<Cursor>,
    on_save: Option<Function>,
    overlay: Option<JsOverlay>,
    measure_ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasHost for JsHost {
    fn redraw(&mut self) {
        self.dirty = true;
    }

    fn save_state(&mut self, store: &ShapeStore) {
        let Some(callback) = &self.on_save else {
            return;
        };
        match serde_json::to_string(store) {
            Ok(json) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("save_state callback failed: {e:?}");
                }
            }
            Err(e) => log::error!("could not serialize shapes: {e}"),
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    fn text_overlay(&mut self) -> Option<&mut dyn TextEditSurface> {
        self.overlay
            .as_mut()
            .map(|overlay| overlay as &mut dyn TextEditSurface)
    }

    fn measure_text(&self, line: &str, font_px: f32) -> Option<f32> {
        let ctx = self.measure_ctx.as_ref()?;
        ctx.set_font(&format!("{font_px}px {FONT_FAMILY}"));
        ctx.measure_text(line).ok().map(|m| m.width() as f32)
    }
}

/// Snapshot of UI-relevant state for the page's toolbar.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiState<'a> {
    tool: &'a str,
    zoom: f32,
    cursor: &'a str,
    text_editing: bool,
    animating: bool,
    shape_count: usize,
}

/// The main WASM-facing canvas controller.
///
/// Holds the editor, the JS host adapter, and the current drawing style.
/// Pointer coordinates are canvas-element offsets in screen pixels; they
/// are divided by the zoom before reaching the tools.
#[wasm_bindgen]
pub struct InkCanvas {
    editor: Editor,
    host: JsHost,
    style: DrawStyle,
}

impl Default for InkCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl InkCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self::from_config(CanvasConfig::default())
    }

    /// Create a canvas with a JSON `CanvasConfig` (missing keys use defaults).
    pub fn with_config(json: &str) -> Result<InkCanvas, JsValue> {
        console_error_panic_hook_setup();
        let config: CanvasConfig =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config))
    }

    // ─── Pointer API ─────────────────────────────────────────────────────

    /// Returns true if the event was consumed.
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        pressure: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = self.pointer(x, y, pressure, shift, ctrl, alt, meta);
        self.editor.pointer_down(&event, &self.style, &mut self.host)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_move(
        &mut self,
        x: f32,
        y: f32,
        pressure: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = self.pointer(x, y, pressure, shift, ctrl, alt, meta);
        self.editor.pointer_move(&event, &mut self.host)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_up(
        &mut self,
        x: f32,
        y: f32,
        pressure: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = self.pointer(x, y, pressure, shift, ctrl, alt, meta);
        self.editor.pointer_up(&event, &self.style, &mut self.host)
    }

    // ─── Keyboard and text overlay ───────────────────────────────────────

    /// `key` is `KeyboardEvent.key`. Returns true if handled, so the page
    /// can `preventDefault()`.
    pub fn key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.editor.key(key, modifiers, &mut self.host)
    }

    pub fn text_commit(&mut self, text: &str) -> bool {
        self.editor.text_commit(text, &mut self.host)
    }

    pub fn text_cancel(&mut self) -> bool {
        self.editor.text_cancel(&mut self.host)
    }

    pub fn text_blur(&mut self, text: &str) -> bool {
        self.editor.text_blur(text, &mut self.host)
    }

    pub fn is_text_editing(&self) -> bool {
        self.editor.is_text_editing()
    }

    // ─── Tools and style ─────────────────────────────────────────────────

    /// Switch tools by name (`"rectangle"`, `"rect"`, `"pen"`, ...).
    /// Returns false for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match name.parse::<ToolKind>() {
            Ok(kind) => {
                self.editor.set_tool(kind, &mut self.host);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn toggle_last_tool(&mut self) -> String {
        self.editor.toggle_last_tool(&mut self.host);
        self.tool_name()
    }

    pub fn tool_name(&self) -> String {
        self.editor.active_tool().name().to_string()
    }

    /// Set the style for subsequent gestures. Returns false if the color
    /// does not parse; the previous style is kept in that case.
    pub fn set_style(&mut self, color: &str, stroke_width: f32, opacity: f32) -> bool {
        let Some(color) = Color::from_hex(color) else {
            return false;
        };
        self.style = DrawStyle {
            color,
            stroke_width,
            opacity,
            fill: self.style.fill,
        }
        .sanitized();
        true
    }

    /// Fill color for rectangles and circles; empty string clears it.
    pub fn set_fill(&mut self, color: &str) -> bool {
        if color.is_empty() {
            self.style.fill = None;
            return true;
        }
        match Color::from_hex(color) {
            Some(c) => {
                self.style.fill = Some(c);
                true
            }
            None => false,
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.editor.set_zoom(zoom, &mut self.host);
    }

    pub fn zoom(&self) -> f32 {
        self.editor.zoom()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Repaint everything onto `ctx`.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
        let mut surface = Canvas2dSurface::new(ctx, width, height);
        self.editor.render(&mut surface);
        self.host.dirty = false;
    }

    /// True when something changed since the last `render`.
    pub fn needs_redraw(&self) -> bool {
        self.host.dirty
    }

    /// CSS cursor for the canvas element.
    pub fn cursor(&self) -> String {
        self.host.cursor.unwrap_or(Cursor::Default).css().to_string()
    }

    /// Advance the move animation. Returns true while more frames are
    /// needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.editor.tick(now_ms, &mut self.host)
    }

    /// Animate a shape's first anchor to `(x, y)` in canvas coordinates.
    pub fn animate_move(&mut self, id: &str, x: f32, y: f32) -> bool {
        let Some(id) = self
            .editor
            .store()
            .iter()
            .find(|s| s.id.as_str() == id)
            .map(|s| s.id)
        else {
            return false;
        };
        self.editor.animate_move(id, (x, y))
    }

    // ─── Host wiring ─────────────────────────────────────────────────────

    /// Called with the shapes JSON after every commit or removal.
    pub fn on_save_state(&mut self, callback: Function) {
        self.host.on_save = Some(callback);
    }

    /// Register the overlay element's `begin(x, y, fontPx, color, text)`,
    /// `end()` and `content()` functions.
    pub fn set_text_overlay(&mut self, begin: Function, end: Function, content: Function) {
        self.host.overlay = Some(JsOverlay {
            begin,
            end,
            content,
        });
    }

    /// Context used for text measurement (hit-testing text boxes).
    pub fn set_measure_context(&mut self, ctx: CanvasRenderingContext2d) {
        self.host.measure_ctx = Some(ctx);
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn shapes_json(&self) -> String {
        serde_json::to_string(self.editor.store()).unwrap_or_else(|e| {
            log::error!("could not serialize shapes: {e}");
            "[]".to_string()
        })
    }

    /// Replace all shapes. Returns false (and keeps the current shapes) if
    /// the JSON does not describe a valid shape list.
    pub fn load_shapes_json(&mut self, json: &str) -> bool {
        match parse_store(json) {
            Ok(store) => {
                self.editor.replace_shapes(store, &mut self.host);
                true
            }
            Err(e) => {
                log::warn!("rejecting shapes: {e}");
                false
            }
        }
    }

    pub fn shape_count(&self) -> usize {
        self.editor.store().len()
    }

    /// Toolbar state as JSON.
    pub fn ui_state_json(&self) -> String {
        let tool = self.editor.active_tool().name();
        let state = UiState {
            tool,
            zoom: self.editor.zoom(),
            cursor: self.host.cursor.unwrap_or(Cursor::Default).css(),
            text_editing: self.editor.is_text_editing(),
            animating: self.editor.is_animating(),
            shape_count: self.editor.store().len(),
        };
        serde_json::to_string(&state).unwrap_or_default()
    }
}

impl InkCanvas {
    fn from_config(config: CanvasConfig) -> Self {
        Self {
            editor: Editor::new(config),
            host: JsHost::default(),
            style: DrawStyle::default(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn pointer(
        &self,
        x: f32,
        y: f32,
        pressure: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> PointerEvent {
        let zoom = self.editor.zoom();
        PointerEvent {
            x: x / zoom,
            y: y / zoom,
            pressure,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        }
    }
}

/// Deserialize and validate a shape list.
fn parse_store(json: &str) -> Result<ShapeStore, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Inkflow WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
