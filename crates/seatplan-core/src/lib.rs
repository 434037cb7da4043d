//! SeatPlan Core Library
//!
//! Platform-agnostic data structures and interaction logic for the SeatPlan
//! floor-plan editor.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod edit;
pub mod engine;
pub mod input;
pub mod seat;
pub mod selection;
pub mod shapes;
pub mod snap;
pub mod storage;
pub mod text;
pub mod text_edit;
pub mod tools;

pub use camera::Camera;
pub use canvas::FloorPlan;
pub use config::{ConfigError, EditorConfig, TextDefaults};
pub use edit::{EditIntent, Patch, SeatPatch, ShapePatch, TextPatch};
pub use engine::Editor;
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use seat::{Seat, SeatId};
pub use selection::{EntityRef, PrimarySelection};
pub use shapes::{Circle, GeometryError, Polygon, Rectangle, Shape, ShapeId, ShapeStyle};
pub use snap::{GRID_SIZE, snap_to_grid};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use text::{Text, TextId, TextStyle};
pub use text_edit::{TextEditOutcome, TextEditSession};
pub use tools::{Gesture, GhostPreview, Overlays, PolygonPreview, ToolKind, ToolManager};
