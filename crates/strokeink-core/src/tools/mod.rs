//! Tools and the pointer input state machine.

use crate::elements::{Element, Shape, Stroke, Text};
use crate::error::{EditorError, EditorResult};
use crate::style::StyleState;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Shape,
    Text,
    Eraser,
}

impl ToolKind {
    /// Whether pointer-up finishes the element for this tool.
    pub fn commits_on_release(self) -> bool {
        !matches!(self, ToolKind::Text)
    }
}

/// Geometry accumulated while drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum Sketch {
    Stroke { points: Vec<Point>, erase: bool },
    Shape { center: Point, rim: Point },
    Text { position: Point, content: String },
}

impl Sketch {
    fn start(tool: ToolKind, point: Point) -> Self {
        match tool {
            ToolKind::Pen => Sketch::Stroke {
                points: vec![point],
                erase: false,
            },
            ToolKind::Eraser => Sketch::Stroke {
                points: vec![point],
                erase: true,
            },
            ToolKind::Shape => Sketch::Shape {
                center: point,
                rim: point,
            },
            ToolKind::Text => Sketch::Text {
                position: point,
                content: String::new(),
            },
        }
    }

    fn extend(&mut self, point: Point) {
        match self {
            Sketch::Stroke { points, .. } => points.push(point),
            Sketch::Shape { rim, .. } => *rim = point,
            Sketch::Text { position, .. } => *position = point,
        }
    }

    /// Build an element with the given style state's current values.
    fn to_element(&self, style: &StyleState) -> Element {
        let current = style.current().clone();
        match self {
            Sketch::Stroke { points, erase: false } => {
                Stroke::from_points(points.clone(), current).into()
            }
            Sketch::Stroke { points, erase: true } => Stroke::eraser(points.clone(), current).into(),
            Sketch::Shape { center, rim } => {
                Shape::from_drag(style.shape_kind(), *center, *rim, style.fill_shapes(), current).into()
            }
            Sketch::Text { position, content } => Text::new(*position, content.clone(), current).into(),
        }
    }
}

/// State of the input tracker.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrackerState {
    #[default]
    Idle,
    Drawing { tool: ToolKind, sketch: Sketch },
}

impl TrackerState {
    fn name(&self) -> &'static str {
        match self {
            TrackerState::Idle => "idle",
            TrackerState::Drawing { .. } => "drawing",
        }
    }
}

/// Converts pointer input into in-progress and finished elements.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    state: TrackerState,
    /// RDP tolerance applied to finished strokes.
    simplify_tolerance: Option<f64>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_simplify_tolerance(tolerance: Option<f64>) -> Self {
        Self {
            state: TrackerState::Idle,
            simplify_tolerance: tolerance.filter(|t| t.is_finite() && *t > 0.0),
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Check if a drawing interaction is active.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, TrackerState::Drawing { .. })
    }

    /// Tool of the active interaction.
    pub fn active_tool(&self) -> Option<ToolKind> {
        match &self.state {
            TrackerState::Drawing { tool, .. } => Some(*tool),
            TrackerState::Idle => None,
        }
    }

    /// Begin a new element. An unfinished element is abandoned.
    pub fn begin(&mut self, tool: ToolKind, point: Point) {
        if let TrackerState::Drawing { tool: previous, .. } = &self.state {
            log::debug!("begin({:?}) abandons unfinished {:?} element", tool, previous);
        }
        self.state = TrackerState::Drawing {
            tool,
            sketch: Sketch::start(tool, point),
        };
    }

    /// Extend the in-progress element.
    pub fn extend(&mut self, point: Point) -> EditorResult<()> {
        match &mut self.state {
            TrackerState::Drawing { sketch, .. } => {
                sketch.extend(point);
                Ok(())
            }
            TrackerState::Idle => Err(EditorError::input_state("extend", "idle")),
        }
    }

    /// Set the content of an in-progress text element.
    pub fn set_text(&mut self, text: impl Into<String>) -> EditorResult<()> {
        match &mut self.state {
            TrackerState::Drawing {
                sketch: Sketch::Text { content, .. },
                ..
            } => {
                *content = text.into();
                Ok(())
            }
            TrackerState::Drawing { .. } => Err(EditorError::input_state("set text", "drawing a non-text element")),
            TrackerState::Idle => Err(EditorError::input_state("set text", "idle")),
        }
    }

    /// Finish the in-progress element, stamping it with the current style.
    pub fn commit(&mut self, style: &StyleState) -> EditorResult<Element> {
        let TrackerState::Drawing { sketch, .. } = std::mem::take(&mut self.state) else {
            return Err(EditorError::input_state("commit", "idle"));
        };
        let mut element = sketch.to_element(style);
        if let (Some(tolerance), Element::Stroke(stroke)) = (self.simplify_tolerance, &mut element) {
            stroke.simplify(tolerance);
        }
        Ok(element)
    }

    /// Discard the in-progress element.
    pub fn cancel(&mut self) -> EditorResult<()> {
        if !self.is_drawing() {
            return Err(EditorError::input_state("cancel", self.state.name()));
        }
        self.state = TrackerState::Idle;
        Ok(())
    }

    /// The in-progress element drawn with the live style, if drawing.
    pub fn preview(&self, style: &StyleState) -> Option<Element> {
        match &self.state {
            TrackerState::Drawing { sketch, .. } => Some(sketch.to_element(style)),
            TrackerState::Idle => None,
        }
    }
}
