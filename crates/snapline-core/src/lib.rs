//! Snapline Core Library
//!
//! Alignment guide lines and snapping for drag-and-drop canvas editors.

pub mod canvas;
pub mod config;
pub mod drag;
pub mod element;
pub mod lines;
pub mod material;
pub mod ori;
pub mod snap;

pub use canvas::{Canvas, CanvasError, CanvasResult};
pub use config::{Config, ConfigError, DEFAULT_LINE_THRESHOLD};
pub use drag::{DragFrame, DragSession, MoveData};
pub use element::{ElementId, Group, Moveable, MoveableElement, Pos, Widget, update_element_pos};
pub use lines::{DisplayLines, LineInfo};
pub use material::{Material, MaterialRegistry, BOX_MATERIAL_ID};
pub use ori::{Axis, Ori, XORIS, YORIS};
pub use snap::{AlignmentEngine, AxisLines, GeometryProvider, SnapError, SnapResult};
