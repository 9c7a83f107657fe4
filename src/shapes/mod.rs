//! Shape definitions for the drawing engine.

mod arc;
mod circle;
mod line;

pub use arc::Arc;
pub use circle::Circle;
pub use line::Line;

use crate::navigator::Navigator;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for shapes.
///
/// The document format only requires uniqueness within the owning layer;
/// the allocator hands out process-wide unique values, which trivially
/// satisfies that.
pub type ShapeId = u64;

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a fresh shape id.
pub(crate) fn next_shape_id() -> ShapeId {
    NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Move the id allocator past `max_seen`, so shapes loaded from a document
/// never collide with freshly created ones.
pub(crate) fn reserve_shape_ids(max_seen: ShapeId) {
    NEXT_SHAPE_ID.fetch_max(max_seen.saturating_add(1), Ordering::Relaxed);
}

/// Stroke color (RGBA8), serialized as `[r, g, b, a]`.
///
/// Documents may carry channels as integers or floats; decode accepts both,
/// validates the 0-255 range, and rounds to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl TryFrom<[f64; 4]> for Color {
    type Error = String;

    fn try_from(channels: [f64; 4]) -> Result<Self, Self::Error> {
        for c in channels {
            // The range check also rejects NaN.
            if !(0.0..=255.0).contains(&c) {
                return Err(format!("color channel {c} outside [0, 255]"));
            }
        }
        let [r, g, b, a] = channels.map(|c| c.round() as u8);
        Ok(Self { r, g, b, a })
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Serde adapter that writes a [`Point`] as a two-element `[x, y]` array.
pub(crate) mod point_array {
    use kurbo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(p: &Point, serializer: S) -> Result<S::Ok, S::Error> {
        (p.x, p.y).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let (x, y) = <(f64, f64)>::deserialize(deserializer)?;
        Ok(Point::new(x, y))
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + t * seg;
    (point - proj).hypot()
}

/// Direction angle of a vector in degrees, normalized to `[0, 360)`.
///
/// Measured counter-clockwise from the +X axis in the screen-style Y-down
/// convention: `(1, 0)` is 0°, `(0, 1)` is 90°, `(0, -1)` is 270°.
/// A zero-length vector yields 0.
pub fn vector_angle(v: Vec2) -> f64 {
    let len = v.hypot();
    if len < f64::EPSILON {
        return 0.0;
    }
    let deg = (v.x / len).clamp(-1.0, 1.0).acos().to_degrees();
    // For a tiny negative y the acos term rounds to 0 and 360 - 0 would
    // land exactly on the excluded upper bound; fold it back to 0.
    if v.y >= 0.0 { deg } else { (360.0 - deg) % 360.0 }
}

/// A geometric primitive, tagged for serialization.
///
/// Every variant supports the same geometric operations: bounding box,
/// hit distance, anchor containment, translation, duplication, and a strict
/// JSON encoding discriminated by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id,
            Shape::Circle(s) => s.id,
            Shape::Arc(s) => s.id,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Shape::Line(s) => s.color,
            Shape::Circle(s) => s.color,
            Shape::Arc(s) => s.color,
        }
    }

    pub fn thickness(&self) -> f64 {
        match self {
            Shape::Line(s) => s.thickness,
            Shape::Circle(s) => s.thickness,
            Shape::Arc(s) => s.thickness,
        }
    }

    /// Axis-aligned bounding box in workspace coordinates, expanded by half
    /// the stroke thickness on every side.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounding_box(),
            Shape::Circle(s) => s.bounding_box(),
            Shape::Arc(s) => s.bounding_box(),
        }
    }

    /// Distance from a workspace point to the shape's stroke, used for
    /// hover/click picking. Always finite, even for degenerate geometry.
    pub fn hit_distance(&self, point: Point) -> f64 {
        match self {
            Shape::Line(s) => s.hit_distance(point),
            Shape::Circle(s) => s.hit_distance(point),
            Shape::Arc(s) => s.hit_distance(point),
        }
    }

    /// Anchor test for rectangular drag selection: true when the shape's
    /// defining point(s) fall inside `rect`. This is not a geometric
    /// overlap test.
    pub fn anchors_in_rect(&self, rect: Rect) -> bool {
        match self {
            Shape::Line(s) => rect.contains(s.p1) || rect.contains(s.p2),
            Shape::Circle(s) => rect.contains(s.center),
            Shape::Arc(s) => rect.contains(s.center),
        }
    }

    /// Translate all defining points by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Line(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Arc(s) => s.translate(delta),
        }
    }

    pub fn move_left(&mut self, amount: f64) {
        self.translate(Vec2::new(-amount, 0.0));
    }

    pub fn move_right(&mut self, amount: f64) {
        self.translate(Vec2::new(amount, 0.0));
    }

    pub fn move_up(&mut self, amount: f64) {
        self.translate(Vec2::new(0.0, -amount));
    }

    pub fn move_down(&mut self, amount: f64) {
        self.translate(Vec2::new(0.0, amount));
    }

    /// Clone the shape under a freshly allocated id.
    pub fn duplicate(&self) -> Shape {
        let mut copy = self.clone();
        copy.set_id(next_shape_id());
        copy
    }

    fn set_id(&mut self, id: ShapeId) {
        match self {
            Shape::Line(s) => s.id = id,
            Shape::Circle(s) => s.id = id,
            Shape::Arc(s) => s.id = id,
        }
    }

    /// Viewport culling: false only when the screen-space bounding box lies
    /// entirely outside the viewport on one axis. Partial overlap renders.
    pub fn should_be_rendered(&self, navigator: &Navigator) -> bool {
        let bounds = self.bounding_box();
        let min = navigator.workspace_to_screen(Point::new(bounds.x0, bounds.y0));
        let max = navigator.workspace_to_screen(Point::new(bounds.x1, bounds.y1));
        let viewport = navigator.viewport;
        !(max.x < 0.0 || min.x > viewport.width || max.y < 0.0 || min.y > viewport.height)
    }
}
