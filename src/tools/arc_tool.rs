//! Arc tool: three-click center / radius+start-angle / sweep construction.

use super::{PointerButton, Tool, ToolContext, ToolStyle};
use crate::navigator::Navigator;
use crate::render::DrawCommand;
use crate::shapes::{Arc, Shape, vector_angle};
use kurbo::Point;

/// Construction stages. Each stage carries only the data that is valid in
/// that stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum ArcToolState {
    #[default]
    Idle,
    /// Center placed; the radius follows the pointer.
    CenterPlaced { center: Point, radius: f64 },
    /// Radius and start angle fixed; the end angle follows the pointer.
    /// The next left click commits.
    SweepPending {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

/// Builds arcs from three clicks: center, then radius + start angle, then
/// end angle. Any non-left click cancels back to idle.
#[derive(Debug, Clone, Default)]
pub struct ArcTool {
    pub(crate) state: ArcToolState,
}

impl ArcTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.state == ArcToolState::Idle
    }
}

impl Tool for ArcTool {
    fn on_space_clicked(&mut self, ctx: &mut ToolContext<'_>, button: PointerButton, screen_pos: Point) {
        if button != PointerButton::Left {
            self.state = ArcToolState::Idle;
            return;
        }

        let pos = ctx.resolve(screen_pos);
        self.state = match self.state {
            ArcToolState::Idle => ArcToolState::CenterPlaced {
                center: pos,
                radius: 0.0,
            },
            ArcToolState::CenterPlaced { center, .. } => {
                let radius = (pos - center).hypot();
                let start_angle = vector_angle(pos - center);
                ArcToolState::SweepPending {
                    center,
                    radius,
                    start_angle,
                    // The end angle tracks the pointer from here on.
                    end_angle: start_angle,
                }
            }
            ArcToolState::SweepPending {
                center,
                radius,
                start_angle,
                ..
            } => {
                let end_angle = vector_angle(pos - center);
                let mut arc = Arc::new(center, radius, start_angle, end_angle);
                arc.color = ctx.style.color;
                arc.thickness = ctx.style.thickness;
                ctx.layer.add_shape(Shape::Arc(arc));
                ArcToolState::Idle
            }
        };
    }

    fn on_mouse_hovered(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        let pos = ctx.resolve(screen_pos);
        match &mut self.state {
            ArcToolState::Idle => {}
            ArcToolState::CenterPlaced { center, radius } => {
                *radius = (pos - *center).hypot();
            }
            ArcToolState::SweepPending { center, end_angle, .. } => {
                *end_angle = vector_angle(pos - *center);
            }
        }
    }

    fn on_tool_changed(&mut self) {
        self.state = ArcToolState::Idle;
    }

    fn cancel_shape(&mut self) {
        self.state = ArcToolState::Idle;
    }

    fn step_back(&mut self) -> bool {
        match self.state {
            ArcToolState::Idle => false,
            ArcToolState::CenterPlaced { .. } => {
                self.state = ArcToolState::Idle;
                true
            }
            ArcToolState::SweepPending { center, radius, .. } => {
                self.state = ArcToolState::CenterPlaced { center, radius };
                true
            }
        }
    }

    fn render_preview(&self, navigator: &Navigator, style: &ToolStyle) -> Vec<DrawCommand> {
        match self.state {
            ArcToolState::Idle => Vec::new(),
            // Before the start angle exists the preview is the radius circle.
            ArcToolState::CenterPlaced { center, radius } => vec![DrawCommand::Circle {
                center: navigator.workspace_to_screen(center),
                radius: navigator.workspace_to_screen_distance(radius),
                thickness: navigator.workspace_to_screen_distance(style.thickness),
                color: style.color,
            }],
            ArcToolState::SweepPending {
                center,
                radius,
                start_angle,
                end_angle,
            } => vec![DrawCommand::Arc {
                center: navigator.workspace_to_screen(center),
                radius: navigator.workspace_to_screen_distance(radius),
                start_angle,
                end_angle,
                thickness: navigator.workspace_to_screen_distance(style.thickness),
                color: style.color,
            }],
        }
    }
}
