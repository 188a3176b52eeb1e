//! Adapter that repaints a surface whenever the editor presents a frame.

use crate::renderer::Renderer;
use crate::surface::DrawingSurface;
use strokeink_core::editor::{Frame, Viewer};

/// Renders every presented frame onto an owned surface.
#[derive(Debug)]
pub struct SurfaceViewer<S> {
    renderer: Renderer,
    surface: S,
    frames: usize,
}

impl<S: DrawingSurface> SurfaceViewer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            renderer: Renderer::new(),
            surface,
            frames: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Number of frames successfully rendered.
    pub fn frames_presented(&self) -> usize {
        self.frames
    }
}

impl<S: DrawingSurface> Viewer for SurfaceViewer<S> {
    fn present(&mut self, frame: &Frame<'_>) {
        match self.renderer.render_frame(frame, &mut self.surface) {
            Ok(()) => self.frames += 1,
            Err(err) => log::warn!("frame not rendered: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use kurbo::{Point, Size};
    use std::cell::RefCell;
    use std::rc::Rc;
    use strokeink_core::Editor;

    fn stroke_colors(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetStrokeColor(color) => Some(color.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_repaints_preview_with_live_style() {
        let viewer = Rc::new(RefCell::new(SurfaceViewer::new(RecordingSurface::new(
            Size::new(50.0, 50.0),
        ))));
        let mut editor = Editor::new();
        editor.set_viewer(Box::new(Rc::clone(&viewer)));
        assert_eq!(viewer.borrow().frames_presented(), 1);

        editor.set_color("green").unwrap();
        editor.begin(Point::new(0.0, 0.0)).unwrap();
        editor.extend(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(stroke_colors(viewer.borrow().surface().commands()), vec!["green"]);

        editor.set_color("purple").unwrap();
        assert_eq!(stroke_colors(viewer.borrow().surface().commands()), vec!["purple"]);

        editor.commit().unwrap();
        editor.set_color("black").unwrap();
        assert_eq!(stroke_colors(viewer.borrow().surface().commands()), vec!["purple"]);
    }

    #[test]
    fn test_undo_repaints() {
        let viewer = Rc::new(RefCell::new(SurfaceViewer::new(RecordingSurface::new(
            Size::new(50.0, 50.0),
        ))));
        let mut editor = Editor::new();
        editor.set_viewer(Box::new(Rc::clone(&viewer)));

        editor.begin(Point::new(0.0, 0.0)).unwrap();
        editor.extend(Point::new(5.0, 5.0)).unwrap();
        editor.commit().unwrap();
        editor.undo().unwrap();

        let viewer = viewer.borrow();
        assert_eq!(viewer.surface().commands().len(), 1);
        assert!(matches!(viewer.surface().commands()[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn test_failed_render_not_counted() {
        let mut viewer = SurfaceViewer::new(RecordingSurface::new(Size::new(-1.0, 5.0)));
        let document = strokeink_core::Document::new();
        viewer.present(&Frame {
            document: &document,
            preview: None,
        });
        assert_eq!(viewer.frames_presented(), 0);
    }
}
