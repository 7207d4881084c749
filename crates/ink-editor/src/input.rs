//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and stylus events into the pointer events the
//! tools consume. Coordinates are canvas-relative and unzoomed; the host
//! divides by the current zoom before dispatching.

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// `ctrl` or `meta`, whichever the platform uses for commands.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A pointer sample from any device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    /// Pressure from 0.0 (none) to 1.0 (max). Mouse is always 1.0.
    pub pressure: f32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            pressure: 1.0,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// A normalized input event routed through [`crate::Editor::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// `key` is the `KeyboardEvent.key` value (e.g. `"Enter"`, `"r"`).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown(p) | Self::PointerMove(p) | Self::PointerUp(p) => {
                Some(p.position())
            }
            Self::Key { .. } => None,
        }
    }
}
