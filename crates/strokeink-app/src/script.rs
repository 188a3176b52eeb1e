//! Scripted editing sessions.
//!
//! A script is a JSON list of steps replayed against an [`Editor`]:
//!
//! ```json
//! { "steps": [
//!     { "action": "color", "value": "red" },
//!     { "action": "down", "x": 0, "y": 0 },
//!     { "action": "move", "x": 10, "y": 10 },
//!     { "action": "up", "x": 10, "y": 10 }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use strokeink_core::{Editor, EditorResult, Point, PointerEvent, ShapeKind, ToolKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// One host action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: ToolKind },
    Color { value: String },
    LineWidth { value: f64 },
    Font { value: String },
    Shape { kind: ShapeKind },
    Fill { enabled: bool },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    Text { content: String },
    Commit,
    Cancel,
    Undo,
    Redo,
    Clear,
    ReplacePoint { element: usize, index: usize, x: f64, y: f64 },
    InsertPointBefore { element: usize, index: usize, x: f64, y: f64 },
    InsertPointAfter { element: usize, index: usize, x: f64, y: f64 },
    RemovePoint { element: usize, index: usize },
    MoveElement { from: usize, to: usize },
    BringForward { element: usize },
    SendBackward { element: usize },
    /// Move `count` elements from `start` one step later, or to the end.
    MoveRange {
        start: usize,
        count: usize,
        #[serde(default)]
        to_end: bool,
    },
}

impl Script {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Step {
    /// Apply the step to `editor`.
    pub fn apply(&self, editor: &mut Editor) -> EditorResult<()> {
        match self {
            Step::Tool { tool } => editor.set_tool(*tool),
            Step::Color { value } => editor.set_color(value.as_str())?,
            Step::LineWidth { value } => editor.set_line_width(*value)?,
            Step::Font { value } => editor.set_font(value.as_str())?,
            Step::Shape { kind } => editor.set_shape_kind(*kind),
            Step::Fill { enabled } => editor.set_fill_shapes(*enabled),
            Step::Down { x, y } => {
                editor.handle_pointer(PointerEvent::down(*x, *y))?;
            }
            Step::Move { x, y } => {
                editor.handle_pointer(PointerEvent::moved(*x, *y))?;
            }
            Step::Up { x, y } => {
                editor.handle_pointer(PointerEvent::up(*x, *y))?;
            }
            Step::Leave => {
                editor.handle_pointer(PointerEvent::Leave)?;
            }
            Step::Text { content } => editor.set_text(content.as_str())?,
            Step::Commit => {
                editor.commit()?;
            }
            Step::Cancel => editor.cancel()?,
            Step::Undo => {
                editor.undo()?;
            }
            Step::Redo => {
                editor.redo()?;
            }
            Step::Clear => editor.clear()?,
            Step::ReplacePoint { element, index, x, y } => {
                editor.replace_point(*element, *index, Point::new(*x, *y))?
            }
            Step::InsertPointBefore { element, index, x, y } => {
                editor.insert_point_before(*element, *index, Point::new(*x, *y))?
            }
            Step::InsertPointAfter { element, index, x, y } => {
                editor.insert_point_after(*element, *index, Point::new(*x, *y))?
            }
            Step::RemovePoint { element, index } => editor.remove_point(*element, *index)?,
            Step::MoveElement { from, to } => editor.move_element(*from, *to)?,
            Step::BringForward { element } => {
                editor.bring_forward(*element)?;
            }
            Step::SendBackward { element } => {
                editor.send_backward(*element)?;
            }
            Step::MoveRange {
                start,
                count,
                to_end,
            } => editor.move_range(*start, *count, *to_end)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let script = Script::from_json(
            r#"{"steps": [
                {"action": "color", "value": "red"},
                {"action": "down", "x": 0, "y": 0},
                {"action": "move", "x": 10, "y": 10},
                {"action": "up", "x": 10, "y": 10},
                {"action": "tool", "tool": "text"},
                {"action": "down", "x": 5, "y": 40},
                {"action": "text", "content": "永"},
                {"action": "commit"},
                {"action": "insert_point_after", "element": 0, "index": 1, "x": 20, "y": 0}
            ]}"#,
        )
        .unwrap();

        let mut editor = Editor::new();
        for step in &script.steps {
            step.apply(&mut editor).unwrap();
        }

        let document = editor.document();
        assert_eq!(document.len(), 2);
        let stroke = document.element_at(0).unwrap().as_stroke().unwrap();
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.style().color(), "red");
        assert_eq!(document.element_at(1).unwrap().as_text().unwrap().content(), "永");
    }

    #[test]
    fn test_move_range_step() {
        let mut editor = Editor::new();
        for x in 0..3 {
            Step::Down { x: x as f64, y: 0.0 }.apply(&mut editor).unwrap();
            Step::Up { x: x as f64, y: 0.0 }.apply(&mut editor).unwrap();
        }
        let ids: Vec<_> = editor.document().iter().map(|e| e.id()).collect();

        let script = Script::from_json(
            r#"{"steps": [
                {"action": "move_range", "start": 0, "count": 2},
                {"action": "move_range", "start": 0, "count": 1, "to_end": true}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            script.steps[0],
            Step::MoveRange { start: 0, count: 2, to_end: false }
        );
        for step in &script.steps {
            step.apply(&mut editor).unwrap();
        }

        let order: Vec<_> = editor.document().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![ids[0], ids[1], ids[2]]);
        assert!(editor.undo().unwrap());
        let order: Vec<_> = editor.document().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![ids[2], ids[0], ids[1]]);

        let at_end = Step::MoveRange { start: 1, count: 2, to_end: false };
        assert!(at_end.apply(&mut editor).unwrap_err().is_recoverable());
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(Script::from_json(r#"{"steps": [{"action": "explode"}]}"#).is_err());
    }
}
