//! InkPlane Core Library
//!
//! Geometry and interaction engine for the InkPlane 2D vector drawing
//! editor: the shape model and its per-type geometric algorithms,
//! workspace↔screen navigation with grid snapping, layered documents with
//! bounded undo, per-tool interaction state machines, and the JSON document
//! format.
//!
//! Windowing, widget rendering, and rasterization are the host
//! application's concern; the engine emits abstract [`render::DrawCommand`]
//! values once per frame and everything runs synchronously on the UI
//! thread, one input event at a time.

pub mod document;
pub mod history;
pub mod layer;
pub mod navigator;
pub mod render;
pub mod shapes;
pub mod tools;

pub use document::{Document, DocumentError};
pub use history::{DEFAULT_UNDO_CAPACITY, UndoHistory};
pub use layer::{Layer, LayerId};
pub use navigator::Navigator;
pub use render::{DrawCommand, document_commands, layer_commands};
pub use shapes::{Arc, Circle, Color, Line, Shape, ShapeId, point_to_segment_dist, vector_angle};
pub use tools::{
    ArcTool, CircleTool, LineStripTool, PointerButton, SelectTool, Tool, ToolContext, ToolKind,
    ToolManager, ToolStyle,
};
