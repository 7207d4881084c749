pub mod animation;
pub mod editor;
pub mod host;
pub mod input;
pub mod shortcuts;
pub mod tools;

pub use animation::{AnimationStep, MoveAnimation};
pub use editor::Editor;
pub use host::{CanvasHost, Cursor, TextEditRequest, TextEditSurface};
pub use input::{InputEvent, Modifiers, PointerEvent};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{Tool, ToolContext, ToolKind};
