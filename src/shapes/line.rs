//! Line shape.

use super::{Color, ShapeId, next_shape_id, point_array, point_to_segment_dist};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line segment between two workspace points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default = "next_shape_id")]
    pub id: ShapeId,
    /// First endpoint.
    #[serde(with = "point_array")]
    pub p1: Point,
    /// Second endpoint.
    #[serde(with = "point_array")]
    pub p2: Point,
    /// Stroke thickness in workspace units.
    pub thickness: f64,
    /// Stroke color.
    pub color: Color,
}

impl Line {
    /// Create a new line with default stroke attributes.
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            id: next_shape_id(),
            p1,
            p2,
            thickness: 2.0,
            color: Color::black(),
        }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).hypot()
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    /// Endpoint min/max box, expanded by half the stroke thickness.
    pub fn bounding_box(&self) -> Rect {
        let half = self.thickness / 2.0;
        Rect::new(
            self.p1.x.min(self.p2.x),
            self.p1.y.min(self.p2.y),
            self.p1.x.max(self.p2.x),
            self.p1.y.max(self.p2.y),
        )
        .inflate(half, half)
    }

    /// Point-to-segment distance. For a degenerate segment (`p1 == p2`)
    /// this is the distance to `p1`.
    pub fn hit_distance(&self, point: Point) -> f64 {
        point_to_segment_dist(point, self.p1, self.p2)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }
}
