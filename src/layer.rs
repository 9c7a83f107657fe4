//! Layers: ordered shape collections with selection state and undo history.

use crate::history::UndoHistory;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for layers within a document.
pub type LayerId = u64;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

fn next_layer_id() -> LayerId {
    NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed)
}

/// Move the id allocator past `max_seen` (used after loading a document).
pub(crate) fn reserve_layer_ids(max_seen: LayerId) {
    NEXT_LAYER_ID.fetch_max(max_seen.saturating_add(1), Ordering::Relaxed);
}

/// One undoable layer state: shapes plus the selection that went with them.
#[derive(Debug, Clone)]
struct LayerSnapshot {
    shapes: Vec<Shape>,
    selection: HashSet<ShapeId>,
}

/// An ordered, mutable collection of shapes.
///
/// The vector order is the z-order: later shapes render on top and win
/// hit-testing ties. Selection and undo history are runtime state and are
/// not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub shapes: Vec<Shape>,
    #[serde(skip)]
    selection: HashSet<ShapeId>,
    #[serde(skip)]
    history: UndoHistory<LayerSnapshot>,
}

impl Layer {
    /// Create an empty layer with the default undo capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_layer_id(),
            name: name.into(),
            shapes: Vec::new(),
            selection: HashSet::new(),
            history: UndoHistory::default(),
        }
    }

    /// Create an empty layer with an explicit undo capacity.
    pub fn with_undo_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            history: UndoHistory::new(capacity),
            ..Self::new(name)
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    // ---- undo -----------------------------------------------------------

    fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot {
            shapes: self.shapes.clone(),
            selection: self.selection.clone(),
        }
    }

    /// Push the current full state onto the undo history. Called before
    /// every committing mutation.
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Restore the most recent snapshot. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.shapes = snapshot.shapes;
                self.selection = snapshot.selection;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    // ---- shape mutation -------------------------------------------------

    /// Append a shape on top of the z-order. Pushes an undo record first.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.push_undo();
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove a shape by id. Pushes an undo record first; a miss is not a
    /// mutation and leaves the history alone.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let pos = self.shapes.iter().position(|s| s.id() == id)?;
        self.push_undo();
        self.selection.remove(&id);
        Some(self.shapes.remove(pos))
    }

    /// Move a shape to the top of the z-order. Pushes an undo record; an id
    /// miss is not a mutation and leaves the history alone.
    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        match self.shapes.iter().position(|s| s.id() == id) {
            Some(pos) => {
                self.push_undo();
                let shape = self.shapes.remove(pos);
                self.shapes.push(shape);
                true
            }
            None => false,
        }
    }

    /// Move a shape to the bottom of the z-order. Pushes an undo record; an
    /// id miss is not a mutation and leaves the history alone.
    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        match self.shapes.iter().position(|s| s.id() == id) {
            Some(pos) => {
                self.push_undo();
                let shape = self.shapes.remove(pos);
                self.shapes.insert(0, shape);
                true
            }
            None => false,
        }
    }

    // ---- queries --------------------------------------------------------

    /// Ids of shapes whose hit distance is within `tolerance`, front to
    /// back (selection priority order).
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .filter(|s| s.hit_distance(point) <= tolerance)
            .map(|s| s.id())
            .collect()
    }

    /// The frontmost shape within `tolerance` of `point`, if any.
    pub fn hovered_shape(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.hit_distance(point) <= tolerance)
            .map(|s| s.id())
    }

    /// Union of all shape bounding boxes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .map(|s| s.bounding_box())
            .reduce(|acc, b| acc.union(b))
    }

    // ---- selection ------------------------------------------------------

    pub fn selection(&self) -> &HashSet<ShapeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Replace the selection. Ids not present on the layer are dropped, so
    /// the selection stays a subset of live shape ids.
    pub fn select(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        let live: HashSet<ShapeId> = self.shapes.iter().map(|s| s.id()).collect();
        self.selection = ids.into_iter().filter(|id| live.contains(id)).collect();
    }

    pub fn select_only(&mut self, id: ShapeId) {
        self.select([id]);
    }

    pub fn add_to_selection(&mut self, id: ShapeId) {
        if self.shape(id).is_some() {
            self.selection.insert(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn select_all(&mut self) {
        self.selection = self.shapes.iter().map(|s| s.id()).collect();
    }

    /// Select shapes whose anchor point(s) fall inside `rect` (anchor test,
    /// not geometric overlap). Replaces the current selection.
    pub fn select_in_rect(&mut self, rect: Rect) {
        self.selection = self
            .shapes
            .iter()
            .filter(|s| s.anchors_in_rect(rect))
            .map(|s| s.id())
            .collect();
    }

    /// Delete every selected shape under a single undo record. Returns the
    /// number of shapes removed.
    pub fn delete_selection(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        self.push_undo();
        let before = self.shapes.len();
        let selection = std::mem::take(&mut self.selection);
        self.shapes.retain(|s| !selection.contains(&s.id()));
        before - self.shapes.len()
    }

    /// Translate the selected shapes without touching the undo history;
    /// callers batch one undo record per gesture.
    pub fn translate_selection(&mut self, delta: Vec2) {
        for shape in &mut self.shapes {
            if self.selection.contains(&shape.id()) {
                shape.translate(delta);
            }
        }
    }

    /// Translate the selection as one undoable step (keyboard nudge).
    pub fn nudge_selection(&mut self, delta: Vec2) {
        if self.selection.is_empty() {
            return;
        }
        self.push_undo();
        self.translate_selection(delta);
    }

    /// Duplicate the selected shapes (in z-order) under fresh ids, offset
    /// by `offset`. The copies become the new selection. Returns their ids.
    pub fn duplicate_selection(&mut self, offset: Vec2) -> Vec<ShapeId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.push_undo();
        let copies: Vec<Shape> = self
            .shapes
            .iter()
            .filter(|s| self.selection.contains(&s.id()))
            .map(|s| {
                let mut copy = s.duplicate();
                copy.translate(offset);
                copy
            })
            .collect();
        let ids: Vec<ShapeId> = copies.iter().map(|s| s.id()).collect();
        self.shapes.extend(copies);
        self.selection = ids.iter().copied().collect();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Line};

    fn line(x: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0)))
    }

    #[test]
    fn test_add_and_remove_shape() {
        let mut layer = Layer::new("sketch");
        let id = layer.add_shape(line(0.0));
        assert_eq!(layer.len(), 1);
        assert!(layer.shape(id).is_some());

        let removed = layer.remove_shape(id);
        assert!(removed.is_some());
        assert!(layer.is_empty());
    }

    #[test]
    fn test_remove_missing_shape_leaves_history_alone() {
        let mut layer = Layer::new("sketch");
        assert!(layer.remove_shape(999).is_none());
        assert!(!layer.can_undo());
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let mut layer = Layer::new("sketch");
        let id = layer.add_shape(line(0.0));
        layer.remove_shape(id);
        assert!(layer.is_empty());

        assert!(layer.undo());
        assert_eq!(layer.len(), 1);
        assert!(layer.undo());
        assert!(layer.is_empty());
        assert!(!layer.undo());
    }

    #[test]
    fn test_undo_capacity_evicts_oldest() {
        let mut layer = Layer::with_undo_capacity("sketch", 2);
        for x in [0.0, 20.0, 40.0] {
            layer.add_shape(line(x));
        }
        // Only the two most recent snapshots survive.
        assert!(layer.undo());
        assert_eq!(layer.len(), 2);
        assert!(layer.undo());
        assert_eq!(layer.len(), 1);
        assert!(!layer.undo());
    }

    #[test]
    fn test_hovered_shape_prefers_front() {
        let mut layer = Layer::new("sketch");
        let back = layer.add_shape(line(0.0));
        let front = layer.add_shape(line(0.0));
        assert_eq!(layer.hovered_shape(Point::new(5.0, 0.0), 1.0), Some(front));

        let hits = layer.shapes_at_point(Point::new(5.0, 0.0), 1.0);
        assert_eq!(hits, vec![front, back]);
    }

    #[test]
    fn test_select_filters_unknown_ids() {
        let mut layer = Layer::new("sketch");
        let id = layer.add_shape(line(0.0));
        layer.select([id, 424242]);
        assert_eq!(layer.selection().len(), 1);
        assert!(layer.is_selected(id));
    }

    #[test]
    fn test_select_in_rect_uses_anchor_test() {
        let mut layer = Layer::new("sketch");
        let inside = layer.add_shape(Shape::Line(Line::new(
            Point::new(5.0, 5.0),
            Point::new(100.0, 100.0),
        )));
        let outside = layer.add_shape(Shape::Circle(Circle::new(Point::new(50.0, 5.0), 48.0)));

        layer.select_in_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(layer.is_selected(inside));
        assert!(!layer.is_selected(outside));
    }

    #[test]
    fn test_delete_selection_is_one_undo_step() {
        let mut layer = Layer::new("sketch");
        let a = layer.add_shape(line(0.0));
        let b = layer.add_shape(line(20.0));
        layer.select([a, b]);

        assert_eq!(layer.delete_selection(), 2);
        assert!(layer.is_empty());
        assert!(layer.selection().is_empty());

        assert!(layer.undo());
        assert_eq!(layer.len(), 2);
        assert!(layer.is_selected(a) && layer.is_selected(b));
    }

    #[test]
    fn test_duplicate_selection() {
        let mut layer = Layer::new("sketch");
        let id = layer.add_shape(Shape::Circle(Circle::new(Point::ZERO, 5.0)));
        layer.select_only(id);

        let copies = layer.duplicate_selection(Vec2::new(10.0, 10.0));
        assert_eq!(copies.len(), 1);
        assert_eq!(layer.len(), 2);
        assert!(!layer.is_selected(id));
        assert!(layer.is_selected(copies[0]));

        let Shape::Circle(copy) = layer.shape(copies[0]).unwrap() else {
            unreachable!()
        };
        assert_eq!(copy.center, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_z_order_moves() {
        let mut layer = Layer::new("sketch");
        let a = layer.add_shape(line(0.0));
        let b = layer.add_shape(line(0.0));
        layer.bring_to_front(a);
        assert_eq!(layer.shapes()[1].id(), a);
        layer.send_to_back(a);
        assert_eq!(layer.shapes()[0].id(), a);
        assert_eq!(layer.shapes()[1].id(), b);
    }

    #[test]
    fn test_z_order_moves_are_undoable() {
        let mut layer = Layer::new("sketch");
        let a = layer.add_shape(line(0.0));
        let b = layer.add_shape(line(20.0));

        assert!(layer.bring_to_front(a));
        assert_eq!(layer.shapes()[1].id(), a);

        // Undo restores the pre-reorder order, not the last add.
        assert!(layer.undo());
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.shapes()[0].id(), a);
        assert_eq!(layer.shapes()[1].id(), b);

        // An id miss pushes nothing: the next undo is the second add.
        assert!(!layer.send_to_back(999));
        assert!(layer.undo());
        assert_eq!(layer.len(), 1);
    }
}
