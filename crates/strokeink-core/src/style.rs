//! Drawing style and the editor's current style state.

use crate::elements::ShapeKind;
use crate::error::{EditorError, EditorResult};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Style snapshot stamped into every element at creation.
///
/// Values are validated on construction; an element's style is never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    color: String,
    line_width: f64,
    font: String,
}

impl Style {
    /// Default stroke color.
    pub const DEFAULT_COLOR: &'static str = "#000000";
    /// Default line width in canvas units.
    pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
    /// Default font, in CSS font shorthand.
    pub const DEFAULT_FONT: &'static str = "16px sans-serif";

    /// Create a validated style.
    pub fn new(
        color: impl Into<String>,
        line_width: f64,
        font: impl Into<String>,
    ) -> EditorResult<Self> {
        let style = Self {
            color: color.into(),
            line_width,
            font: font.into(),
        };
        style.validate()?;
        Ok(style)
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// Check the invariants a style must hold.
    pub fn validate(&self) -> EditorResult<()> {
        validate_color(&self.color)?;
        validate_line_width(self.line_width)?;
        validate_font(&self.font)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR.to_string(),
            line_width: Self::DEFAULT_LINE_WIDTH,
            font: Self::DEFAULT_FONT.to_string(),
        }
    }
}

fn validate_color(color: &str) -> EditorResult<()> {
    if color.trim().is_empty() {
        return Err(EditorError::StyleValidation("color must not be empty".into()));
    }
    Ok(())
}

fn validate_line_width(width: f64) -> EditorResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(EditorError::StyleValidation(format!(
            "line width must be positive, got {}",
            width
        )));
    }
    Ok(())
}

fn validate_font(font: &str) -> EditorResult<()> {
    if font.trim().is_empty() {
        return Err(EditorError::StyleValidation("font must not be empty".into()));
    }
    Ok(())
}

/// The mutable "current" style and tool selection of an editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleState {
    current: Style,
    active_tool: ToolKind,
    shape_kind: ShapeKind,
    fill_shapes: bool,
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl StyleState {
    /// Create a style state starting from `style` with the pen selected.
    pub fn new(style: Style) -> Self {
        Self {
            current: style,
            active_tool: ToolKind::default(),
            shape_kind: ShapeKind::default(),
            fill_shapes: false,
        }
    }

    /// The current style; cloned into new elements.
    pub fn current(&self) -> &Style {
        &self.current
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    pub fn fill_shapes(&self) -> bool {
        self.fill_shapes
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) -> EditorResult<()> {
        let color = color.into();
        validate_color(&color)?;
        self.current.color = color;
        Ok(())
    }

    pub fn set_line_width(&mut self, width: f64) -> EditorResult<()> {
        validate_line_width(width)?;
        self.current.line_width = width;
        Ok(())
    }

    pub fn set_font(&mut self, font: impl Into<String>) -> EditorResult<()> {
        let font = font.into();
        validate_font(&font)?;
        self.current.font = font;
        Ok(())
    }

    pub fn set_shape_kind(&mut self, kind: ShapeKind) {
        self.shape_kind = kind;
    }

    pub fn set_fill_shapes(&mut self, fill: bool) {
        self.fill_shapes = fill;
    }
}
