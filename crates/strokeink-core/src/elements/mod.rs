//! Drawable elements of a document.

mod shape;
mod stroke;
mod text;

pub use shape::{Shape, ShapeKind};
pub use stroke::Stroke;
pub use text::Text;

use crate::style::Style;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// One drawable unit of a document.
///
/// The set of kinds is closed; the renderer and the file format match on
/// it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Stroke(s) => s.id(),
            Element::Shape(s) => s.id(),
            Element::Text(s) => s.id(),
        }
    }

    /// The style frozen into this element at creation.
    pub fn style(&self) -> &Style {
        match self {
            Element::Stroke(s) => s.style(),
            Element::Shape(s) => s.style(),
            Element::Text(s) => s.style(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Stroke(s) => s.bounds(),
            Element::Shape(s) => s.bounds(),
            Element::Text(s) => s.bounds(),
        }
    }

    /// Short lowercase name of the element kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::Stroke(s) if s.is_eraser() => "eraser",
            Element::Stroke(_) => "stroke",
            Element::Shape(_) => "shape",
            Element::Text(_) => "text",
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Element::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Element::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Stroke> for Element {
    fn from(stroke: Stroke) -> Self {
        Element::Stroke(stroke)
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Element::Shape(shape)
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}
