pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod store;

pub use config::{CanvasConfig, EraserHitMode};
pub use id::ShapeId;
pub use model::*;
pub use store::ShapeStore;
