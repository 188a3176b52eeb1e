//! StrokeInk Core Library
//!
//! Platform-agnostic document model, input state machine, undo history and
//! file format for the StrokeInk stroke editor.

pub mod config;
pub mod document;
pub mod editor;
pub mod elements;
pub mod error;
pub mod format;
pub mod history;
pub mod input;
pub mod style;
pub mod tools;

pub use config::EditorConfig;
pub use document::Document;
pub use editor::{ChangeKind, Editor, EditorEvent, Frame, Viewer};
pub use elements::{Element, ElementId, Shape, ShapeKind, Stroke, Text};
pub use error::{EditorError, EditorResult};
pub use history::{History, HistoryEntry};
pub use input::PointerEvent;
pub use style::{Style, StyleState};
pub use tools::{InputTracker, ToolKind, TrackerState};

pub use kurbo::Point;
