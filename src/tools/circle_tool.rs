//! Circle tool: two-click center / radius construction.

use super::{PointerButton, Tool, ToolContext, ToolStyle};
use crate::navigator::Navigator;
use crate::render::DrawCommand;
use crate::shapes::{Circle, Shape};
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum CircleToolState {
    #[default]
    Idle,
    /// Center placed; the radius follows the pointer until the next left
    /// click commits.
    CenterPlaced { center: Point, radius: f64 },
}

/// Builds circles from two clicks: center, then a point on the perimeter.
/// A non-left click cancels.
#[derive(Debug, Clone, Default)]
pub struct CircleTool {
    pub(crate) state: CircleToolState,
}

impl CircleTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.state == CircleToolState::Idle
    }
}

impl Tool for CircleTool {
    fn on_space_clicked(&mut self, ctx: &mut ToolContext<'_>, button: PointerButton, screen_pos: Point) {
        if button != PointerButton::Left {
            self.state = CircleToolState::Idle;
            return;
        }

        let pos = ctx.resolve(screen_pos);
        self.state = match self.state {
            CircleToolState::Idle => CircleToolState::CenterPlaced {
                center: pos,
                radius: 0.0,
            },
            CircleToolState::CenterPlaced { center, .. } => {
                let mut circle = Circle::new(center, (pos - center).hypot());
                circle.color = ctx.style.color;
                circle.thickness = ctx.style.thickness;
                ctx.layer.add_shape(Shape::Circle(circle));
                CircleToolState::Idle
            }
        };
    }

    fn on_mouse_hovered(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        if let CircleToolState::CenterPlaced { center, radius } = &mut self.state {
            *radius = (ctx.resolve(screen_pos) - *center).hypot();
        }
    }

    fn on_tool_changed(&mut self) {
        self.state = CircleToolState::Idle;
    }

    fn cancel_shape(&mut self) {
        self.state = CircleToolState::Idle;
    }

    fn step_back(&mut self) -> bool {
        match self.state {
            CircleToolState::Idle => false,
            CircleToolState::CenterPlaced { .. } => {
                self.state = CircleToolState::Idle;
                true
            }
        }
    }

    fn render_preview(&self, navigator: &Navigator, style: &ToolStyle) -> Vec<DrawCommand> {
        match self.state {
            CircleToolState::Idle => Vec::new(),
            CircleToolState::CenterPlaced { center, radius } => vec![DrawCommand::Circle {
                center: navigator.workspace_to_screen(center),
                radius: navigator.workspace_to_screen_distance(radius),
                thickness: navigator.workspace_to_screen_distance(style.thickness),
                color: style.color,
            }],
        }
    }
}
