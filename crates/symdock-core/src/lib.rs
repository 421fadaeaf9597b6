//! symdock core library
//!
//! Data model, layout and notation engine for a drag-and-dock editor of
//! symbolic expressions: widgets attach to each other at typed docking
//! points and the resulting trees render to LaTeX, Python, mhchem and MathML.

pub mod config;
pub mod docking;
pub mod error;
pub mod forest;
pub mod format;
pub mod geometry;
pub mod greek;
pub mod host;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod paint;
pub mod search;
pub mod session;
pub mod spec;
pub mod widgets;

pub use config::{EditorConfig, EditorMode, LogicSyntax};
pub use docking::{DockType, DockingPoint, Slot};
pub use error::{EditorError, EditorResult, SpecError};
pub use forest::Forest;
pub use format::{ExpressionResult, Format, RenderOptions};
pub use host::{ActionEntry, ActionEvent, EditorHost, NullHost, RecordingHost};
pub use input::PointerEvent;
pub use metrics::{ApproximateMetrics, FontMetrics, FontdueMetrics};
pub use paint::{DisplayList, PaintCommand, Painter};
pub use search::{DockingTarget, find_nearest};
pub use session::{DragState, EditorState, Session};
pub use spec::{WidgetSpec, parse_specs};
pub use widgets::{Widget, WidgetId, WidgetKind};
