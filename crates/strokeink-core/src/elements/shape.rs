//! Circle and arc shapes.

use super::ElementId;
use crate::style::Style;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use uuid::Uuid;

/// Kind of shape produced by the shape tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Full circle.
    #[default]
    Circle,
    /// Arc from angle zero to the drag angle.
    Arc,
}

/// A circular shape defined by center, radius and angle span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ElementId,
    pub(crate) kind: ShapeKind,
    pub(crate) center: Point,
    pub(crate) radius: f64,
    /// Start angle in radians, measured clockwise from the positive x axis
    /// in canvas coordinates (y down).
    pub(crate) start_angle: f64,
    /// End angle in radians.
    pub(crate) end_angle: f64,
    #[serde(default)]
    pub(crate) filled: bool,
    pub(crate) style: Style,
}

impl Shape {
    /// Create a shape from a drag gesture: `center` is where the drag began,
    /// `rim` the current pointer position.
    pub fn from_drag(kind: ShapeKind, center: Point, rim: Point, filled: bool, style: Style) -> Self {
        let radius = center.distance(rim);
        let end_angle = match kind {
            ShapeKind::Circle => TAU,
            ShapeKind::Arc => drag_angle(center, rim),
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            center,
            radius,
            start_angle: 0.0,
            end_angle,
            filled,
            style,
        }
    }

    /// Create a full circle.
    pub fn circle(center: Point, radius: f64, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Circle,
            center,
            radius,
            start_angle: 0.0,
            end_angle: TAU,
            filled: false,
            style,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Bounding box of the full circle including the stroke width.
    pub fn bounds(&self) -> Rect {
        let r = self.radius + self.style.line_width() / 2.0;
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }
}

/// Angle of `rim` around `center`, normalized to `(0, 2π]`.
fn drag_angle(center: Point, rim: Point) -> f64 {
    let delta = rim - center;
    if delta.hypot2() < f64::EPSILON {
        return TAU;
    }
    let angle = delta.atan2();
    if angle <= 0.0 { angle + TAU } else { angle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_circle_from_drag() {
        let shape = Shape::from_drag(
            ShapeKind::Circle,
            Point::new(10.0, 10.0),
            Point::new(13.0, 14.0),
            false,
            Style::default(),
        );
        assert_eq!(shape.radius(), 5.0);
        assert_eq!(shape.start_angle(), 0.0);
        assert_eq!(shape.end_angle(), TAU);
    }

    #[test]
    fn test_arc_from_drag() {
        // straight down in canvas coordinates is a quarter turn
        let shape = Shape::from_drag(
            ShapeKind::Arc,
            Point::new(0.0, 0.0),
            Point::new(0.0, 20.0),
            false,
            Style::default(),
        );
        assert!((shape.end_angle() - FRAC_PI_2).abs() < 1e-12);

        let up = Shape::from_drag(
            ShapeKind::Arc,
            Point::new(0.0, 0.0),
            Point::new(0.0, -20.0),
            false,
            Style::default(),
        );
        assert!((up.end_angle() - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_drag_arc_is_full_turn() {
        let shape = Shape::from_drag(
            ShapeKind::Arc,
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            true,
            Style::default(),
        );
        assert_eq!(shape.radius(), 0.0);
        assert_eq!(shape.end_angle(), TAU);
        assert!(shape.is_filled());
    }

    #[test]
    fn test_bounds() {
        let shape = Shape::circle(
            Point::new(50.0, 50.0),
            30.0,
            Style::new("red", 4.0, "10px serif").unwrap(),
        );
        assert_eq!(shape.bounds(), Rect::new(18.0, 18.0, 82.0, 82.0));
    }
}
