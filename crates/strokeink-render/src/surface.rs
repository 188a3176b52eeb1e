//! The 2D drawing surface the renderer paints onto.

use kurbo::{Point, Rect, Size};

/// How new paint combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Remove existing content where painted.
    DestinationOut,
}

/// Immediate-mode 2D drawing context, modelled on the canvas 2D API.
///
/// Colors and fonts are CSS strings passed through untouched. Path
/// operations build a current path; `stroke` and `fill` paint it without
/// clearing it, `begin_path` starts a new one.
pub trait DrawingSurface {
    /// Drawable area in canvas units.
    fn size(&self) -> Size;

    /// Erase everything inside `rect`.
    fn clear(&mut self, rect: Rect);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Add a circular arc from `start_angle` to `end_angle` (radians,
    /// clockwise in y-down space). Connects from the current point if any.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    fn stroke(&mut self);

    fn fill(&mut self);

    /// Draw `text` with its alphabetic baseline starting at `position`.
    fn fill_text(&mut self, text: &str, position: Point);

    fn set_stroke_color(&mut self, color: &str);

    fn set_fill_color(&mut self, color: &str);

    fn set_line_width(&mut self, width: f64);

    fn set_font(&mut self, font: &str);

    fn set_composite(&mut self, mode: CompositeMode);
}
