//! Tool state machines that turn raw pointer events into committed shapes.
//!
//! Each tool is a small finite-state machine spanning several input events.
//! The host feeds it screen-space pointer events together with a
//! [`ToolContext`]; the tool resolves coordinates through the Navigator,
//! keeps a pending-shape preview, and commits finished shapes to the active
//! layer on the transitions documented per tool.

mod arc_tool;
mod circle_tool;
mod line_strip;
mod select;

pub use arc_tool::ArcTool;
pub use circle_tool::CircleTool;
pub use line_strip::LineStripTool;
pub use select::SelectTool;

use crate::layer::Layer;
use crate::navigator::Navigator;
use crate::render::DrawCommand;
use crate::shapes::Color;
use kurbo::Point;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Stroke attributes applied to newly committed shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStyle {
    pub color: Color,
    pub thickness: f64,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            color: Color::black(),
            thickness: 2.0,
        }
    }
}

/// Everything a tool needs to react to one event, passed by explicit
/// reference: the view transform, the active layer, and the current stroke
/// style. There is no global editor state.
pub struct ToolContext<'a> {
    pub navigator: &'a Navigator,
    pub layer: &'a mut Layer,
    pub style: ToolStyle,
}

impl ToolContext<'_> {
    /// Resolve a screen position to a snapped workspace position.
    pub fn resolve(&self, screen_pos: Point) -> Point {
        self.navigator.snap(self.navigator.screen_to_workspace(screen_pos))
    }

    /// Resolve without grid snapping (picking wants exact positions).
    pub fn resolve_unsnapped(&self, screen_pos: Point) -> Point {
        self.navigator.screen_to_workspace(screen_pos)
    }
}

/// A pointer-driven interaction state machine.
///
/// Invariants every implementation upholds: shapes reach the layer only on
/// the documented committing transition, cancellation never leaves a
/// partial shape behind, and `step_back` reports `false` when the tool is
/// already idle.
pub trait Tool {
    /// A click landed on empty canvas space (not on a UI widget).
    fn on_space_clicked(&mut self, ctx: &mut ToolContext<'_>, button: PointerButton, screen_pos: Point);

    /// The pointer moved with no button held; updates previews.
    fn on_mouse_hovered(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point);

    /// The pointer moved with a button held. Drawing tools treat this like
    /// a hover.
    fn on_mouse_dragged(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        self.on_mouse_hovered(ctx, screen_pos);
    }

    /// The held button was released.
    fn on_mouse_released(&mut self, _ctx: &mut ToolContext<'_>, _screen_pos: Point) {}

    /// The tool was activated or deactivated; drop in-progress state.
    fn on_tool_changed(&mut self);

    /// Abort the in-progress construction.
    fn cancel_shape(&mut self);

    /// Undo one construction stage. Returns whether a step was consumed;
    /// `false` when already idle.
    fn step_back(&mut self) -> bool;

    /// Screen-space preview of the in-progress shape, if any.
    fn render_preview(&self, navigator: &Navigator, style: &ToolStyle) -> Vec<DrawCommand>;

    /// Select every shape on the layer. Tools without a multi-shape
    /// selection concept log a warning and ignore the request.
    fn select_all(&mut self, _ctx: &mut ToolContext<'_>) {
        log::warn!("select-all is not supported by the active tool");
    }

    /// Duplicate the current selection (clipboard paste). Tools without a
    /// selection concept log a warning and ignore the request.
    fn duplicate_selection(&mut self, _ctx: &mut ToolContext<'_>) {
        log::warn!("duplicate-selection is not supported by the active tool");
    }
}

/// Available drawing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolKind {
    #[default]
    Select,
    LineStrip,
    Circle,
    Arc,
}

/// Owns the tool instances and the active drawing mode, and routes pointer
/// events to whichever tool is current.
#[derive(Debug, Default)]
pub struct ToolManager {
    current: ToolKind,
    pub style: ToolStyle,
    select: SelectTool,
    line_strip: LineStripTool,
    circle: CircleTool,
    arc: ArcTool,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ToolKind {
        self.current
    }

    /// Switch tools. Both the outgoing and incoming tool reset, so no
    /// half-built shape survives a mode change.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.active_mut().on_tool_changed();
        self.current = kind;
        self.active_mut().on_tool_changed();
    }

    fn active(&self) -> &dyn Tool {
        match self.current {
            ToolKind::Select => &self.select,
            ToolKind::LineStrip => &self.line_strip,
            ToolKind::Circle => &self.circle,
            ToolKind::Arc => &self.arc,
        }
    }

    fn active_mut(&mut self) -> &mut dyn Tool {
        match self.current {
            ToolKind::Select => &mut self.select,
            ToolKind::LineStrip => &mut self.line_strip,
            ToolKind::Circle => &mut self.circle,
            ToolKind::Arc => &mut self.arc,
        }
    }

    pub fn on_space_clicked(&mut self, ctx: &mut ToolContext<'_>, button: PointerButton, screen_pos: Point) {
        self.active_mut().on_space_clicked(ctx, button, screen_pos);
    }

    pub fn on_mouse_hovered(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        self.active_mut().on_mouse_hovered(ctx, screen_pos);
    }

    pub fn on_mouse_dragged(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        self.active_mut().on_mouse_dragged(ctx, screen_pos);
    }

    pub fn on_mouse_released(&mut self, ctx: &mut ToolContext<'_>, screen_pos: Point) {
        self.active_mut().on_mouse_released(ctx, screen_pos);
    }

    pub fn cancel_shape(&mut self) {
        self.active_mut().cancel_shape();
    }

    pub fn step_back(&mut self) -> bool {
        self.active_mut().step_back()
    }

    pub fn render_preview(&self, navigator: &Navigator) -> Vec<DrawCommand> {
        self.active().render_preview(navigator, &self.style)
    }

    pub fn select_all(&mut self, ctx: &mut ToolContext<'_>) {
        self.active_mut().select_all(ctx);
    }

    pub fn duplicate_selection(&mut self, ctx: &mut ToolContext<'_>) {
        self.active_mut().duplicate_selection(ctx);
    }
}
