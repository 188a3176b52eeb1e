//! A surface that records drawing commands instead of painting.

use crate::surface::{CompositeMode, DrawingSurface};
use kurbo::{Point, Rect, Size};

/// One call made on a [`DrawingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Stroke,
    Fill,
    FillText {
        text: String,
        position: Point,
    },
    SetStrokeColor(String),
    SetFillColor(String),
    SetLineWidth(f64),
    SetFont(String),
    SetComposite(CompositeMode),
}

/// Display list of everything drawn since the last clear.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay the recorded commands onto another surface.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, target: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(rect) => target.clear(*rect),
                DrawCommand::BeginPath => target.begin_path(),
                DrawCommand::MoveTo(p) => target.move_to(*p),
                DrawCommand::LineTo(p) => target.line_to(*p),
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => target.arc(*center, *radius, *start_angle, *end_angle),
                DrawCommand::Stroke => target.stroke(),
                DrawCommand::Fill => target.fill(),
                DrawCommand::FillText { text, position } => target.fill_text(text, *position),
                DrawCommand::SetStrokeColor(color) => target.set_stroke_color(color),
                DrawCommand::SetFillColor(color) => target.set_fill_color(color),
                DrawCommand::SetLineWidth(width) => target.set_line_width(*width),
                DrawCommand::SetFont(font) => target.set_font(font),
                DrawCommand::SetComposite(mode) => target.set_composite(*mode),
            }
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    /// A full clear drops earlier commands.
    fn clear(&mut self, rect: Rect) {
        if rect.contains_rect(Rect::from_origin_size(Point::ZERO, self.size)) {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn fill_text(&mut self, text: &str, position: Point) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            position,
        });
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetStrokeColor(color.to_string()));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetFillColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.commands.push(DrawCommand::SetComposite(mode));
    }
}
