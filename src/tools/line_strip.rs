//! Line-strip tool: a connected polyline of independently committed
//! segments.

use super::{PointerButton, Tool, ToolContext, ToolStyle};
use crate::navigator::Navigator;
use crate::render::DrawCommand;
use crate::shapes::{Line, Shape};
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum LineStripState {
    #[default]
    Idle,
    /// A segment from `p1` is pending; `p2` follows the pointer.
    Drawing { p1: Point, p2: Point },
}

/// Each left click commits the pending segment and immediately starts the
/// next one from the same (snapped) point, so consecutive segments share
/// endpoints. A non-left click drops the pending segment.
#[derive(Debug, Clone, Default)]
pub struct LineStripTool {
    pub(crate) state: LineStripState,
}

impl LineStripTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.state == LineStripState::Idle
    }
}

impl Tool for LineStripTool {
    fn on_space_clicked(&mut self, ctx: &mut ToolContext<'_>, button: PointerButton, screen_pos: Point) {
        if button != PointerButton::Left {
            self.state = LineStripState::Idle;
            return;
        }

        let pos = ctx.resolve(screen_pos);
        self.state = match self.state {
            LineStripState::Idle => LineStripState::Drawing { p1: pos, p2: pos },
            LineStripState::Drawing { p1, .. } => {
                let mut line = Line::new(p1, pos);
                line.color = ctx.style.color;
                line.thickness = ctx.style.thickness;
                ctx.layer.add_shape(Shape::Line(line));
                // Continue the strip from the committed endpoint.
                LineStripState::Drawing { p1: pos, p2: pos }
            }
        };
    }

    fn on_mouse_hovered(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        if let LineStripState::Drawing { p2, .. } = &mut self.state {
            *p2 = ctx.resolve(screen_pos);
        }
    }

    fn on_tool_changed(&mut self) {
        self.state = LineStripState::Idle;
    }

    fn cancel_shape(&mut self) {
        self.state = LineStripState::Idle;
    }

    fn step_back(&mut self) -> bool {
        match self.state {
            LineStripState::Idle => false,
            LineStripState::Drawing { .. } => {
                self.state = LineStripState::Idle;
                true
            }
        }
    }

    fn render_preview(&self, navigator: &Navigator, style: &ToolStyle) -> Vec<DrawCommand> {
        match self.state {
            LineStripState::Idle => Vec::new(),
            LineStripState::Drawing { p1, p2 } => vec![DrawCommand::Line {
                p1: navigator.workspace_to_screen(p1),
                p2: navigator.workspace_to_screen(p2),
                thickness: navigator.workspace_to_screen_distance(style.thickness),
                color: style.color,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::layer::Layer;

    #[test]
    fn test_strip_commits_connected_segments() {
        let nav = identity_navigator();
        let mut layer = Layer::new("sketch");
        let mut tool = LineStripTool::new();
        let mut ctx = ctx(&nav, &mut layer);

        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::ZERO);
        assert!(ctx.layer.is_empty());

        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::new(10.0, 0.0));
        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::new(10.0, 10.0));
        assert_eq!(ctx.layer.len(), 2);

        let Shape::Line(first) = &ctx.layer.shapes()[0] else {
            panic!("expected a line");
        };
        let Shape::Line(second) = &ctx.layer.shapes()[1] else {
            panic!("expected a line");
        };
        assert_eq!(first.p1, Point::ZERO);
        assert_eq!(first.p2, Point::new(10.0, 0.0));
        // The next segment starts where the previous one ended.
        assert_eq!(second.p1, first.p2);
        assert_eq!(second.p2, Point::new(10.0, 10.0));

        // Still drawing: the strip continues until cancelled.
        assert!(!tool.is_idle());
    }

    #[test]
    fn test_clicks_are_snapped() {
        let mut nav = identity_navigator();
        nav.snap_size = 10.0;
        let mut layer = Layer::new("sketch");
        let mut tool = LineStripTool::new();
        let mut ctx = ctx(&nav, &mut layer);

        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::new(3.0, 4.0));
        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::new(18.0, 22.0));

        let Shape::Line(line) = &ctx.layer.shapes()[0] else {
            panic!("expected a line");
        };
        assert_eq!(line.p1, Point::ZERO);
        assert_eq!(line.p2, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_hover_updates_preview_endpoint() {
        let nav = identity_navigator();
        let mut layer = Layer::new("sketch");
        let mut tool = LineStripTool::new();
        let mut ctx = ctx(&nav, &mut layer);

        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::ZERO);
        tool.on_mouse_hovered(&mut ctx, Point::new(7.0, 3.0));
        assert_eq!(
            tool.state,
            LineStripState::Drawing {
                p1: Point::ZERO,
                p2: Point::new(7.0, 3.0)
            }
        );
    }

    #[test]
    fn test_non_left_click_drops_pending_segment() {
        let nav = identity_navigator();
        let mut layer = Layer::new("sketch");
        let mut tool = LineStripTool::new();
        let mut ctx = ctx(&nav, &mut layer);

        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::ZERO);
        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::new(10.0, 0.0));
        tool.on_space_clicked(&mut ctx, PointerButton::Middle, Point::new(20.0, 0.0));

        // The committed segment stays; the pending one is gone.
        assert_eq!(ctx.layer.len(), 1);
        assert!(tool.is_idle());
        assert!(tool.render_preview(&nav, &ToolStyle::default()).is_empty());
    }

    #[test]
    fn test_step_back_only_while_drawing() {
        let nav = identity_navigator();
        let mut layer = Layer::new("sketch");
        let mut tool = LineStripTool::new();
        let mut ctx = ctx(&nav, &mut layer);

        assert!(!tool.step_back());
        tool.on_space_clicked(&mut ctx, PointerButton::Left, Point::ZERO);
        assert!(tool.step_back());
        assert!(!tool.step_back());
    }
}
