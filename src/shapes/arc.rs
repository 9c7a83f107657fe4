//! Arc shape.

use super::{Color, ShapeId, next_shape_id, point_array};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A circular arc defined by center, radius, and a start/end angle pair.
///
/// Angles are degrees in `[0, 360)`, counter-clockwise from the +X axis in
/// the screen-style Y-down convention (see [`super::vector_angle`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    #[serde(default = "next_shape_id")]
    pub id: ShapeId,
    /// Center of the supporting circle.
    #[serde(with = "point_array")]
    pub center: Point,
    /// Radius in workspace units.
    pub radius: f64,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
    /// Stroke thickness in workspace units.
    pub thickness: f64,
    /// Stroke color.
    pub color: Color,
}

impl Arc {
    /// Create a new arc with default stroke attributes.
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            id: next_shape_id(),
            center,
            radius,
            start_angle,
            end_angle,
            thickness: 2.0,
            color: Color::black(),
        }
    }

    /// Bounding box of the full supporting circle, expanded by half the
    /// stroke thickness. Deliberately conservative: the angular span is not
    /// taken into account.
    pub fn bounding_box(&self) -> Rect {
        let extent = self.radius.abs() + self.thickness / 2.0;
        Rect::new(
            self.center.x - extent,
            self.center.y - extent,
            self.center.x + extent,
            self.center.y + extent,
        )
    }

    /// Distance to the full supporting circle, with the same degenerate
    /// cap as [`super::Circle::hit_distance`]. The angular span is ignored
    /// on purpose: picking behaves as if the arc were closed.
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
    fn test_bounding_box_covers_full_circle() {
        // A quarter arc still reports the supporting circle's box.
        let arc = Arc::new(Point::ZERO, 10.0, 0.0, 90.0);
        let bounds = arc.bounding_box();
        assert_eq!(bounds, Rect::new(-11.0, -11.0, 11.0, 11.0));
    }

    #[test]
    fn test_hit_distance_matches_supporting_circle() {
        let arc = Arc::new(Point::ZERO, 5.0, 0.0, 90.0);
        // On the arc itself.
        assert!(arc.hit_distance(Point::new(5.0, 0.0)) < 1e-9);
        // On the supporting circle but outside the angular span: still a hit
        // at distance zero, matching the circle metric.
        assert!(arc.hit_distance(Point::new(-5.0, 0.0)) < 1e-9);
        assert!((arc.hit_distance(Point::new(8.0, 0.0)) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_translate_moves_center_only() {
        let mut arc = Arc::new(Point::ZERO, 5.0, 30.0, 120.0);
        arc.translate(Vec2::new(1.0, 2.0));
        assert_eq!(arc.center, Point::new(1.0, 2.0));
        assert_eq!(arc.start_angle, 30.0);
        assert_eq!(arc.end_angle, 120.0);
    }
}
