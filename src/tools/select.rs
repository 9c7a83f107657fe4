//! Select tool: click picking, rubber-band box selection, and move drags.

use super::{PointerButton, Tool, ToolContext, ToolStyle};
use crate::navigator::Navigator;
use crate::render::DrawCommand;
use crate::shapes::Color;
use kurbo::{Point, Rect, Vec2};

/// Pick tolerance around a shape's stroke, in screen pixels.
const HOVER_TOLERANCE_PX: f64 = 6.0;

/// Workspace offset applied to duplicated shapes so copies don't land
/// exactly on their originals.
const PASTE_OFFSET: Vec2 = Vec2::new(12.0, 12.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum SelectState {
    #[default]
    Idle,
    /// Rubber-band selection in progress; both corners in workspace
    /// coordinates.
    BoxSelecting { start: Point, current: Point },
    /// Dragging the selection. The undo record is pushed lazily on the
    /// first actual movement.
    Moving { last: Point, pushed_undo: bool },
}

/// Clicking picks the frontmost hovered shape; dragging it moves the whole
/// selection as one undo step. Dragging from empty space rubber-bands an
/// anchor-test box selection.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    pub(crate) state: SelectState,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for SelectTool {
    fn on_space_clicked(&mut self, ctx: &mut ToolContext<'_>, button: PointerButton, screen_pos: Point) {
        if button != PointerButton::Left {
            self.state = SelectState::Idle;
            return;
        }

        // Picking wants exact positions, not grid-snapped ones.
        let pos = ctx.resolve_unsnapped(screen_pos);
        let tolerance = ctx.navigator.screen_to_workspace_distance(HOVER_TOLERANCE_PX);

        if let Some(id) = ctx.layer.hovered_shape(pos, tolerance) {
            // Clicking an already-selected shape keeps the group selected
            // so it can be dragged together.
            if !ctx.layer.is_selected(id) {
                ctx.layer.select_only(id);
            }
            self.state = SelectState::Moving {
                last: pos,
                pushed_undo: false,
            };
        } else {
            ctx.layer.clear_selection();
            self.state = SelectState::BoxSelecting {
                start: pos,
                current: pos,
            };
        }
    }

    fn on_mouse_hovered(&mut self, _ctx: &mut ToolContext<'_>, _screen_pos: Point) {
        // Hover highlighting is the host UI's concern.
    }

    fn on_mouse_dragged(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        let pos = ctx.resolve_unsnapped(screen_pos);
        match &mut self.state {
            SelectState::Idle => {}
            SelectState::BoxSelecting { current, .. } => *current = pos,
            SelectState::Moving { last, pushed_undo } => {
                let delta = pos - *last;
                if delta.hypot2() > 0.0 {
                    if !*pushed_undo {
                        ctx.layer.push_undo();
                        *pushed_undo = true;
                    }
                    ctx.layer.translate_selection(delta);
                    *last = pos;
                }
            }
        }
    }

    fn on_mouse_released(&mut self, ctx: &mut ToolContext<'_>, _screen_pos: Point) {
        if let SelectState::BoxSelecting { start, current } = self.state {
            ctx.layer.select_in_rect(Rect::from_points(start, current));
        }
        self.state = SelectState::Idle;
    }

    fn on_tool_changed(&mut self) {
        self.state = SelectState::Idle;
    }

    fn cancel_shape(&mut self) {
        self.state = SelectState::Idle;
    }

    fn step_back(&mut self) -> bool {
        match self.state {
            SelectState::Idle => false,
            _ => {
                self.state = SelectState::Idle;
                true
            }
        }
    }

    fn render_preview(&self, navigator: &Navigator, _style: &ToolStyle) -> Vec<DrawCommand> {
        match self.state {
            SelectState::BoxSelecting { start, current } => {
                let rect = Rect::from_points(
                    navigator.workspace_to_screen(start),
                    navigator.workspace_to_screen(current),
                );
                let color = Color::new(80, 140, 255, 255);
                let corners = [
                    Point::new(rect.x0, rect.y0),
                    Point::new(rect.x1, rect.y0),
                    Point::new(rect.x1, rect.y1),
                    Point::new(rect.x0, rect.y1),
                ];
                (0..4)
                    .map(|i| DrawCommand::Line {
                        p1: corners[i],
                        p2: corners[(i + 1) % 4],
                        thickness: 1.0,
                        color,
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    fn select_all(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.layer.select_all();
    }

    fn duplicate_selection(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.layer.duplicate_selection(PASTE_OFFSET);
    }
}
