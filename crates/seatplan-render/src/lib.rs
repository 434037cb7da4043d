//! SeatPlan Render Library
//!
//! Renderer abstraction for SeatPlan. Frames are built into a backend
//! independent display list ([`Scene`]) from an immutable borrow of the
//! editor.

pub mod color;
mod renderer;
pub mod scene;

pub use color::{color_or, parse_hex_color};
pub use renderer::{GridStyle, RecordingRenderer, RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{DrawCommand, Layer, Scene, SceneItem, StrokeStyle};
