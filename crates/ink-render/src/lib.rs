pub mod hit;
pub mod paint;
pub mod recording;
#[cfg(feature = "vello")]
pub mod scene;
pub mod surface;

pub use paint::{arrow_head, paint_eraser_preview, paint_scene, paint_shape};
pub use recording::{DrawOp, RecordingSurface};
#[cfg(feature = "vello")]
pub use scene::SceneSurface;
pub use surface::{ApproxMeasure, Surface, TextMeasure};
