//! Circle shape.

use super::{Color, ShapeId, next_shape_id, point_array};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A full circle defined by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default = "next_shape_id")]
    pub id: ShapeId,
    /// Center point.
    #[serde(with = "point_array")]
    pub center: Point,
    /// Radius in workspace units.
    pub radius: f64,
    /// Stroke thickness in workspace units.
    pub thickness: f64,
    /// Stroke color.
    pub color: Color,
}

impl Circle {
    /// Create a new circle with default stroke attributes.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: next_shape_id(),
            center,
            radius,
            thickness: 2.0,
            color: Color::black(),
        }
    }

    /// `center ± (|radius| + half thickness)` on both axes.
    pub fn bounding_box(&self) -> Rect {
        let extent = self.radius.abs() + self.thickness / 2.0;
        Rect::new(
            self.center.x - extent,
            self.center.y - extent,
            self.center.x + extent,
            self.center.y + extent,
        )
    }

    /// Distance from the stroke: `|d(point, center) - radius|`, capped at
    /// `d(point, center)` so a degenerate radius still yields a sane value.
    pub fn hit_distance(&self, point: Point) -> f64 {
        let d = (point - self.center).hypot();
        (d - self.radius).abs().min(d)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_distance_on_stroke() {
        let circle = Circle::new(Point::ZERO, 5.0);
        assert!(circle.hit_distance(Point::new(5.0, 0.0)) < 1e-9);
        assert!(circle.hit_distance(Point::new(0.0, -5.0)) < 1e-9);
    }

    #[test]
    fn test_hit_distance_inside_and_outside() {
        let circle = Circle::new(Point::ZERO, 5.0);
        assert!((circle.hit_distance(Point::new(3.0, 0.0)) - 2.0).abs() < 1e-9);
        assert!((circle.hit_distance(Point::new(9.0, 0.0)) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_distance_capped_at_center_distance() {
        // Without the cap, a query near the center of a large circle would
        // report nearly the full radius even for a degenerate radius sign.
        let circle = Circle::new(Point::ZERO, 5.0);
        assert_eq!(circle.hit_distance(Point::ZERO), 0.0);

        let negative = Circle::new(Point::ZERO, -5.0);
        let d = negative.hit_distance(Point::new(1.0, 0.0));
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_includes_thickness() {
        let mut circle = Circle::new(Point::new(10.0, -10.0), 5.0);
        circle.thickness = 2.0;
        let bounds = circle.bounding_box();
        assert_eq!(bounds, Rect::new(4.0, -16.0, 16.0, -4.0));
    }

    #[test]
    fn test_translate() {
        let mut circle = Circle::new(Point::ZERO, 1.0);
        circle.translate(Vec2::new(3.0, 4.0));
        assert_eq!(circle.center, Point::new(3.0, 4.0));
    }
}
