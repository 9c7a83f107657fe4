//! Navigator: workspace/screen coordinate transforms and grid snapping.

use kurbo::{Point, Size, Vec2};

/// Minimum allowed workspace-to-screen scale.
pub const MIN_SCALE: f64 = 0.1;
/// Maximum allowed workspace-to-screen scale.
pub const MAX_SCALE: f64 = 10.0;

/// The Navigator owns the workspace↔screen affine transform.
///
/// Shapes are stored in workspace coordinates, a pan/zoom-independent unit
/// system; the renderer consumes screen coordinates. Conversions are always
/// explicit, and callers track which space a point is in.
///
/// `workspace_to_screen(p) = p * scale + pan_offset + viewport / 2`.
#[derive(Debug, Clone)]
pub struct Navigator {
    /// Screen-space translation.
    pub pan_offset: Vec2,
    /// Workspace-to-screen scale factor, strictly positive.
    pub scale: f64,
    /// Grid size for snapping, in workspace units. Zero disables snapping.
    pub snap_size: f64,
    /// Viewport size in pixels; its center anchors workspace origin when
    /// the pan offset is zero.
    pub viewport: Size,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            scale: 1.0,
            snap_size: 0.0,
            viewport: Size::new(800.0, 600.0),
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    fn screen_center_offset(&self) -> Vec2 {
        Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Convert a workspace point to screen coordinates.
    pub fn workspace_to_screen(&self, point: Point) -> Point {
        (point.to_vec2() * self.scale + self.pan_offset + self.screen_center_offset()).to_point()
    }

    /// Convert a screen point to workspace coordinates. Exact inverse of
    /// [`Self::workspace_to_screen`] up to floating-point rounding.
    pub fn screen_to_workspace(&self, point: Point) -> Point {
        ((point.to_vec2() - self.pan_offset - self.screen_center_offset()) / self.scale).to_point()
    }

    /// Scale a workspace distance to screen pixels. Distances never carry
    /// the pan offset.
    pub fn workspace_to_screen_distance(&self, distance: f64) -> f64 {
        distance * self.scale
    }

    /// Scale a screen distance back to workspace units.
    pub fn screen_to_workspace_distance(&self, distance: f64) -> f64 {
        distance / self.scale
    }

    /// Quantize each axis independently to the nearest multiple of
    /// `snap_size`, in workspace coordinates. Pass-through when snapping
    /// is disabled.
    pub fn snap(&self, point: Point) -> Point {
        if self.snap_size <= 0.0 {
            return point;
        }
        let s = self.snap_size;
        Point::new((point.x / s).round() * s, (point.y / s).round() * s)
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_workspace(screen_point);
        self.scale = new_scale;

        // Adjust the pan offset so the anchor stays under the pointer.
        let moved = self.workspace_to_screen(anchor);
        self.pan_offset += screen_point - moved;
    }

    /// Reset pan and zoom to defaults. Snapping is left alone.
    pub fn reset(&mut self) {
        self.pan_offset = Vec2::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_viewport_center() {
        let nav = Navigator::new();
        let screen = nav.workspace_to_screen(Point::ZERO);
        assert_eq!(screen, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut nav = Navigator::new();
        nav.pan_offset = Vec2::new(30.0, -20.0);
        nav.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = nav.screen_to_workspace(nav.workspace_to_screen(original));
        assert!((back.x - original.x).abs() < 1e-4);
        assert!((back.y - original.y).abs() < 1e-4);

        let screen = Point::new(-42.0, 17.0);
        let back = nav.workspace_to_screen(nav.screen_to_workspace(screen));
        assert!((back.x - screen.x).abs() < 1e-4);
        assert!((back.y - screen.y).abs() < 1e-4);
    }

    #[test]
    fn test_distance_is_translation_invariant() {
        let mut nav = Navigator::new();
        nav.scale = 2.0;
        nav.pan_offset = Vec2::new(1000.0, 1000.0);
        assert!((nav.workspace_to_screen_distance(5.0) - 10.0).abs() < f64::EPSILON);
        assert!((nav.screen_to_workspace_distance(10.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_quantizes_each_axis() {
        let mut nav = Navigator::new();
        nav.snap_size = 10.0;
        assert_eq!(nav.snap(Point::new(14.0, 26.0)), Point::new(10.0, 30.0));
        assert_eq!(nav.snap(Point::new(-14.0, -26.0)), Point::new(-10.0, -30.0));
    }

    #[test]
    fn test_snap_disabled_passes_through() {
        let nav = Navigator::new();
        let p = Point::new(13.37, -4.2);
        assert_eq!(nav.snap(p), p);
    }

    #[test]
    fn test_snap_idempotent() {
        let mut nav = Navigator::new();
        for snap_size in [0.0, 0.5, 10.0, 25.0] {
            nav.snap_size = snap_size;
            for p in [
                Point::new(13.4, -7.9),
                Point::new(0.0, 0.0),
                Point::new(-1234.5, 987.1),
            ] {
                let once = nav.snap(p);
                assert_eq!(nav.snap(once), once);
            }
        }
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut nav = Navigator::new();
        let anchor_screen = Point::new(200.0, 100.0);
        let anchor_workspace = nav.screen_to_workspace(anchor_screen);

        nav.zoom_at(anchor_screen, 2.0);
        let after = nav.workspace_to_screen(anchor_workspace);
        assert!((after.x - anchor_screen.x).abs() < 1e-9);
        assert!((after.y - anchor_screen.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut nav = Navigator::new();
        nav.zoom_at(Point::ZERO, 0.001);
        assert!((nav.scale - MIN_SCALE).abs() < f64::EPSILON);

        nav.scale = 1.0;
        nav.zoom_at(Point::ZERO, 1000.0);
        assert!((nav.scale - MAX_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut nav = Navigator::new();
        nav.pan(Vec2::new(10.0, 20.0));
        assert_eq!(nav.pan_offset, Vec2::new(10.0, 20.0));
    }
}
