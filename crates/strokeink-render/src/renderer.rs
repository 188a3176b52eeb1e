//! Document rendering onto a [`DrawingSurface`].

use crate::surface::{CompositeMode, DrawingSurface};
use kurbo::{Point, Rect};
use std::f64::consts::TAU;
use strokeink_core::editor::Frame;
use strokeink_core::elements::{Element, Shape, Stroke, Text};
use strokeink_core::Document;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Replays documents as drawing commands.
///
/// Output depends only on the document, the preview and the surface size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Clear the surface and draw every element in paint order.
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        document: &Document,
        surface: &mut S,
    ) -> RenderResult<()> {
        let size = surface.size();
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width < 0.0
            || size.height < 0.0
        {
            return Err(RendererError::Surface(format!(
                "invalid surface size {}x{}",
                size.width, size.height
            )));
        }
        surface.clear(Rect::from_origin_size(Point::ZERO, size));
        for element in document.iter() {
            self.draw_element(element, surface);
        }
        Ok(())
    }

    /// Render the document, then the in-progress element on top.
    pub fn render_preview<S: DrawingSurface + ?Sized>(
        &self,
        document: &Document,
        preview: Option<&Element>,
        surface: &mut S,
    ) -> RenderResult<()> {
        self.render(document, surface)?;
        if let Some(element) = preview {
            self.draw_element(element, surface);
        }
        Ok(())
    }

    pub fn render_frame<S: DrawingSurface + ?Sized>(
        &self,
        frame: &Frame<'_>,
        surface: &mut S,
    ) -> RenderResult<()> {
        self.render_preview(frame.document, frame.preview, surface)
    }

    /// Draw a single element with its own style.
    pub fn draw_element<S: DrawingSurface + ?Sized>(&self, element: &Element, surface: &mut S) {
        match element {
            Element::Stroke(stroke) => draw_stroke(stroke, surface),
            Element::Shape(shape) => draw_shape(shape, surface),
            Element::Text(text) => draw_text(text, surface),
        }
    }
}

fn draw_stroke<S: DrawingSurface + ?Sized>(stroke: &Stroke, surface: &mut S) {
    let style = stroke.style();
    surface.set_composite(if stroke.is_eraser() {
        CompositeMode::DestinationOut
    } else {
        CompositeMode::SourceOver
    });

    match stroke.points() {
        [] => {}
        // A lone point has no segment to stroke; paint a dot instead.
        [point] => {
            surface.set_fill_color(style.color());
            surface.begin_path();
            surface.arc(*point, style.line_width() / 2.0, 0.0, TAU);
            surface.fill();
        }
        [first, rest @ ..] => {
            surface.set_stroke_color(style.color());
            surface.set_line_width(style.line_width());
            surface.begin_path();
            surface.move_to(*first);
            for point in rest {
                surface.line_to(*point);
            }
            surface.stroke();
        }
    }
}

fn draw_shape<S: DrawingSurface + ?Sized>(shape: &Shape, surface: &mut S) {
    let style = shape.style();
    surface.set_composite(CompositeMode::SourceOver);
    surface.begin_path();
    surface.arc(
        shape.center(),
        shape.radius(),
        shape.start_angle(),
        shape.end_angle(),
    );
    if shape.is_filled() {
        surface.set_fill_color(style.color());
        surface.fill();
    } else {
        surface.set_stroke_color(style.color());
        surface.set_line_width(style.line_width());
        surface.stroke();
    }
}

fn draw_text<S: DrawingSurface + ?Sized>(text: &Text, surface: &mut S) {
    let style = text.style();
    surface.set_composite(CompositeMode::SourceOver);
    surface.set_fill_color(style.color());
    surface.set_font(style.font());
    surface.fill_text(text.content(), text.position());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use kurbo::Size;
    use strokeink_core::{Editor, ShapeKind, Style, ToolKind};

    fn sample_editor() -> Editor {
        let mut editor = Editor::new();
        editor.set_color("red").unwrap();
        editor.begin(Point::new(0.0, 0.0)).unwrap();
        editor.extend(Point::new(10.0, 10.0)).unwrap();
        editor.commit().unwrap();

        editor.set_tool(ToolKind::Shape);
        editor.set_shape_kind(ShapeKind::Circle);
        editor.begin(Point::new(50.0, 50.0)).unwrap();
        editor.extend(Point::new(60.0, 50.0)).unwrap();
        editor.commit().unwrap();

        editor.set_tool(ToolKind::Text);
        editor.begin(Point::new(5.0, 95.0)).unwrap();
        editor.set_text("hi").unwrap();
        editor.commit().unwrap();
        editor
    }

    #[test]
    fn test_render_is_deterministic() {
        let editor = sample_editor();
        let renderer = Renderer::new();
        let mut a = RecordingSurface::new(Size::new(100.0, 100.0));
        let mut b = RecordingSurface::new(Size::new(100.0, 100.0));

        renderer.render(editor.document(), &mut a).unwrap();
        renderer.render(editor.document(), &mut b).unwrap();
        assert_eq!(a.commands(), b.commands());
        assert!(!a.commands().is_empty());
    }

    #[test]
    fn test_render_commands() {
        let editor = sample_editor();
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        Renderer::new().render(editor.document(), &mut surface).unwrap();

        let expected = vec![
            DrawCommand::Clear(Rect::new(0.0, 0.0, 100.0, 100.0)),
            DrawCommand::SetComposite(CompositeMode::SourceOver),
            DrawCommand::SetStrokeColor("red".into()),
            DrawCommand::SetLineWidth(2.0),
            DrawCommand::BeginPath,
            DrawCommand::MoveTo(Point::new(0.0, 0.0)),
            DrawCommand::LineTo(Point::new(10.0, 10.0)),
            DrawCommand::Stroke,
            DrawCommand::SetComposite(CompositeMode::SourceOver),
            DrawCommand::BeginPath,
            DrawCommand::Arc {
                center: Point::new(50.0, 50.0),
                radius: 10.0,
                start_angle: 0.0,
                end_angle: TAU,
            },
            DrawCommand::SetStrokeColor("red".into()),
            DrawCommand::SetLineWidth(2.0),
            DrawCommand::Stroke,
            DrawCommand::SetComposite(CompositeMode::SourceOver),
            DrawCommand::SetFillColor("red".into()),
            DrawCommand::SetFont(Style::DEFAULT_FONT.into()),
            DrawCommand::FillText {
                text: "hi".into(),
                position: Point::new(5.0, 95.0),
            },
        ];
        assert_eq!(surface.commands(), expected.as_slice());
    }

    #[test]
    fn test_single_point_stroke_is_dot() {
        let mut editor = Editor::new();
        editor.set_line_width(6.0).unwrap();
        editor.begin(Point::new(3.0, 4.0)).unwrap();
        editor.commit().unwrap();

        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        Renderer::new().render(editor.document(), &mut surface).unwrap();
        assert!(surface.commands().contains(&DrawCommand::Arc {
            center: Point::new(3.0, 4.0),
            radius: 3.0,
            start_angle: 0.0,
            end_angle: TAU,
        }));
        assert_eq!(surface.commands().last(), Some(&DrawCommand::Fill));
    }

    #[test]
    fn test_eraser_uses_destination_out() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Eraser);
        editor.begin(Point::ZERO).unwrap();
        editor.extend(Point::new(1.0, 1.0)).unwrap();
        editor.commit().unwrap();

        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        Renderer::new().render(editor.document(), &mut surface).unwrap();
        assert_eq!(
            surface.commands()[1],
            DrawCommand::SetComposite(CompositeMode::DestinationOut)
        );
    }

    #[test]
    fn test_filled_shape() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Shape);
        editor.set_fill_shapes(true);
        editor.begin(Point::ZERO).unwrap();
        editor.extend(Point::new(0.0, 5.0)).unwrap();
        editor.commit().unwrap();

        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        Renderer::new().render(editor.document(), &mut surface).unwrap();
        assert_eq!(surface.commands().last(), Some(&DrawCommand::Fill));
        assert!(!surface.commands().contains(&DrawCommand::Stroke));
    }

    #[test]
    fn test_preview_drawn_last_with_live_style() {
        let mut editor = sample_editor();
        editor.set_tool(ToolKind::Pen);
        editor.begin(Point::new(1.0, 1.0)).unwrap();
        editor.extend(Point::new(2.0, 2.0)).unwrap();
        editor.set_color("blue").unwrap();

        let preview = editor.preview();
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        Renderer::new()
            .render_preview(editor.document(), preview.as_ref(), &mut surface)
            .unwrap();

        let commands = surface.commands();
        assert_eq!(commands.last(), Some(&DrawCommand::Stroke));
        let last_color = commands
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCommand::SetStrokeColor(color) => Some(color.as_str()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last_color, "blue");
    }

    #[test]
    fn test_invalid_surface_size() {
        let mut surface = RecordingSurface::new(Size::new(f64::NAN, 10.0));
        let result = Renderer::new().render(&Document::new(), &mut surface);
        assert!(matches!(result, Err(RendererError::Surface(_))));
        assert!(surface.commands().is_empty());
    }
}
