//! Capabilities the embedding host provides to the editor.
//!
//! The editor never touches a DOM or window. Everything outside the engine
//! (repaint scheduling, history snapshots, cursor styling, the text-input
//! overlay, font metrics) goes through [`CanvasHost`].

use ink_core::{CanvasConfig, Color, ShapeStore};
use ink_render::{ApproxMeasure, TextMeasure};

/// Cursor a tool wants while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
    Move,
    Text,
    /// Hidden; the tool paints its own preview.
    None,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Move => "move",
            Self::Text => "text",
            Self::None => "none",
        }
    }
}

/// Parameters for opening the text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditRequest {
    /// Overlay position in screen space (canvas coordinates × zoom).
    pub x: f32,
    pub y: f32,
    pub font_px: f32,
    pub color: Color,
    pub initial_text: String,
}

/// Host-owned text input overlay (single or multi-line).
///
/// The host reports the user's outcome back through the editor's
/// `text_commit` / `text_cancel` / `text_blur` entry points; Enter and
/// Escape arrive through `key`.
pub trait TextEditSurface {
    /// Show and focus the overlay.
    fn begin(&mut self, request: &TextEditRequest);

    /// Hide the overlay.
    fn end(&mut self);

    /// Current overlay content.
    fn content(&self) -> String;
}

pub trait CanvasHost {
    /// Repaint everything (the host typically calls `Editor::render`).
    fn redraw(&mut self);

    /// Checkpoint the committed shapes after a commit or removal.
    fn save_state(&mut self, store: &ShapeStore);

    fn set_cursor(&mut self, _cursor: Cursor) {}

    /// The text overlay, if the host has one.
    fn text_overlay(&mut self) -> Option<&mut dyn TextEditSurface> {
        None
    }

    /// Measured width of one line of text, if the host can measure fonts.
    fn measure_text(&self, _line: &str, _font_px: f32) -> Option<f32> {
        None
    }
}

/// [`TextMeasure`] backed by the host, falling back to a fixed advance.
pub struct HostMeasure<'a> {
    host: &'a dyn CanvasHost,
    fallback: ApproxMeasure,
}

impl<'a> HostMeasure<'a> {
    pub fn new(host: &'a dyn CanvasHost, config: &CanvasConfig) -> Self {
        Self {
            host,
            fallback: ApproxMeasure::new(config.text_char_width),
        }
    }
}

impl TextMeasure for HostMeasure<'_> {
    fn line_width(&self, line: &str, font_px: f32) -> f32 {
        self.host
            .measure_text(line, font_px)
            .unwrap_or_else(|| self.fallback.line_width(line, font_px))
    }
}
