//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s, so every host
//! shares one binding table:
//! - single letters switch tools
//! - Tab toggles between the current and previous tool
//! - ⌘= / ⌘- / ⌘0 zoom (Ctrl on other platforms)
//! - Escape abandons the gesture in progress

use crate::input::Modifiers;
use crate::tools::ToolKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Tool(ToolKind),
    /// Toggle between current and previous tool.
    ToggleLastTool,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Drop the in-progress gesture.
    Cancel,
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"r"`, `"Tab"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomReset),
                _ => None,
            };
        }
        if modifiers.alt {
            return None;
        }

        let tool = match key {
            "v" | "V" => ToolKind::Pointer,
            "l" | "L" => ToolKind::Line,
            "a" | "A" => ToolKind::Arrow,
            "r" | "R" => ToolKind::Rectangle,
            "o" | "O" => ToolKind::Circle,
            "p" | "P" => ToolKind::Pencil,
            "e" | "E" => ToolKind::Eraser,
            "t" | "T" => ToolKind::Text,
            "Tab" if !modifiers.shift => return Some(ShortcutAction::ToggleLastTool),
            "Escape" => return Some(ShortcutAction::Cancel),
            _ => return None,
        };
        Some(ShortcutAction::Tool(tool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn cmd() -> Modifiers {
        Modifiers {
            meta: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn resolve_tool_shortcuts() {
        let expected = [
            ("v", ToolKind::Pointer),
            ("l", ToolKind::Line),
            ("a", ToolKind::Arrow),
            ("r", ToolKind::Rectangle),
            ("o", ToolKind::Circle),
            ("p", ToolKind::Pencil),
            ("e", ToolKind::Eraser),
            ("t", ToolKind::Text),
        ];
        for (key, tool) in expected {
            assert_eq!(
                ShortcutMap::resolve(key, Modifiers::NONE),
                Some(ShortcutAction::Tool(tool))
            );
        }
        // Caps lock / shift still switch.
        assert_eq!(
            ShortcutMap::resolve("R", Modifiers::SHIFT),
            Some(ShortcutAction::Tool(ToolKind::Rectangle))
        );
    }

    #[test]
    fn resolve_tab_toggles_tool() {
        assert_eq!(
            ShortcutMap::resolve("Tab", Modifiers::NONE),
            Some(ShortcutAction::ToggleLastTool)
        );
        assert_eq!(ShortcutMap::resolve("Tab", Modifiers::SHIFT), None);
    }

    #[test]
    fn resolve_zoom() {
        assert_eq!(ShortcutMap::resolve("=", cmd()), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("-", cmd()), Some(ShortcutAction::ZoomOut));
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(ShortcutMap::resolve("0", ctrl), Some(ShortcutAction::ZoomReset));
    }

    #[test]
    fn command_letters_are_not_tool_switches() {
        // ⌘R reloads the page in browsers; leave it alone.
        assert_eq!(ShortcutMap::resolve("r", cmd()), None);
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        assert_eq!(ShortcutMap::resolve("q", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("Enter", Modifiers::NONE), None);
    }
}
