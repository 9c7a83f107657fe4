//! Abstract draw commands for the external renderer.
//!
//! The engine does not rasterize. Once per frame it resolves visible shapes
//! into screen-space primitives; the host renderer decides how to draw them.

use crate::document::Document;
use crate::layer::Layer;
use crate::navigator::Navigator;
use crate::shapes::{Color, Shape};
use kurbo::Point;

/// One screen-space primitive for the renderer. Coordinates, radii, and
/// thickness are already transform-resolved pixels; angles stay in degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        p1: Point,
        p2: Point,
        thickness: f64,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        thickness: f64,
        color: Color,
    },
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        thickness: f64,
        color: Color,
    },
}

impl DrawCommand {
    /// Resolve a shape into screen-space geometry.
    pub fn from_shape(shape: &Shape, navigator: &Navigator) -> DrawCommand {
        match shape {
            Shape::Line(s) => DrawCommand::Line {
                p1: navigator.workspace_to_screen(s.p1),
                p2: navigator.workspace_to_screen(s.p2),
                thickness: navigator.workspace_to_screen_distance(s.thickness),
                color: s.color,
            },
            Shape::Circle(s) => DrawCommand::Circle {
                center: navigator.workspace_to_screen(s.center),
                radius: navigator.workspace_to_screen_distance(s.radius),
                thickness: navigator.workspace_to_screen_distance(s.thickness),
                color: s.color,
            },
            Shape::Arc(s) => DrawCommand::Arc {
                center: navigator.workspace_to_screen(s.center),
                radius: navigator.workspace_to_screen_distance(s.radius),
                start_angle: s.start_angle,
                end_angle: s.end_angle,
                thickness: navigator.workspace_to_screen_distance(s.thickness),
                color: s.color,
            },
        }
    }
}

/// Commands for one layer in z-order, with offscreen shapes culled.
pub fn layer_commands(layer: &Layer, navigator: &Navigator) -> Vec<DrawCommand> {
    layer
        .shapes()
        .iter()
        .filter(|s| s.should_be_rendered(navigator))
        .map(|s| DrawCommand::from_shape(s, navigator))
        .collect()
}

/// Commands for the whole document, layers in stacking order.
pub fn document_commands(document: &Document, navigator: &Navigator) -> Vec<DrawCommand> {
    document
        .layers
        .iter()
        .flat_map(|layer| layer_commands(layer, navigator))
        .collect()
}
