//! Freehand stroke element.

use super::ElementId;
use crate::style::Style;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke (ordered series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    pub(crate) points: Vec<Point>,
    /// Strokes made with the eraser remove paint instead of adding it.
    #[serde(default)]
    pub(crate) erase: bool,
    pub(crate) style: Style,
}

impl Stroke {
    /// Create a stroke from existing points.
    pub fn from_points(points: Vec<Point>, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            erase: false,
            style,
        }
    }

    /// Create an eraser stroke.
    pub fn eraser(points: Vec<Point>, style: Style) -> Self {
        Self {
            erase: true,
            ..Self::from_points(points, style)
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_eraser(&self) -> bool {
        self.erase
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy of this stroke with its points replaced. Id and style are kept.
    pub(crate) fn with_points(&self, points: Vec<Point>) -> Self {
        Self {
            points,
            ..self.clone()
        }
    }

    /// Simplify the path by removing redundant points.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 {
            return;
        }

        // Ramer-Douglas-Peucker algorithm
        self.points = rdp_simplify(&self.points, tolerance);
    }

    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        let rect = self
            .points
            .iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p));
        let half = self.style.line_width() / 2.0;
        rect.inflate(half, half)
    }
}

/// Ramer-Douglas-Peucker line simplification.
fn rdp_simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = 0.0;
    let mut max_index = 0;

    for (i, point) in points.iter().enumerate().skip(1).take(points.len() - 2) {
        let dist = perpendicular_distance(*point, first, last);
        if dist > max_dist {
            max_dist = dist;
            max_index = i;
        }
    }

    if max_dist > tolerance {
        let mut left = rdp_simplify(&points[..=max_index], tolerance);
        let right = rdp_simplify(&points[max_index..], tolerance);

        // junction point appears in both halves
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

/// Calculate perpendicular distance from point to line.
fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;

    let line_len_sq = dx * dx + dy * dy;
    if line_len_sq < f64::EPSILON {
        return point.distance(line_start);
    }

    let area2 = ((point.x - line_start.x) * dy - (point.y - line_start.y) * dx).abs();
    area2 / line_len_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_include_half_width() {
        let stroke = Stroke::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            Style::new("black", 2.0, "10px serif").unwrap(),
        );

        let bounds = stroke.bounds();
        assert_eq!(bounds, Rect::new(-1.0, -1.0, 101.0, 101.0));
    }

    #[test]
    fn test_simplify() {
        let mut stroke = Stroke::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.1),
                Point::new(2.0, 0.0),
                Point::new(3.0, 0.1),
                Point::new(4.0, 0.0),
            ],
            Style::default(),
        );

        stroke.simplify(0.5);
        assert_eq!(stroke.points(), &[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
    }

    #[test]
    fn test_simplify_keeps_corners() {
        let mut stroke = Stroke::from_points(
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ],
            Style::default(),
        );

        stroke.simplify(0.5);
        assert_eq!(
            stroke.points(),
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn test_with_points_keeps_identity() {
        let stroke = Stroke::eraser(vec![Point::new(1.0, 1.0)], Style::default());
        let edited = stroke.with_points(vec![Point::new(2.0, 2.0)]);

        assert_eq!(edited.id(), stroke.id());
        assert!(edited.is_eraser());
        assert_eq!(edited.style(), stroke.style());
    }
}
