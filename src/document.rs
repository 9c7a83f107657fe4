//! Document: ordered layers, the active-layer cursor, and JSON persistence.

use crate::layer::{Layer, LayerId};
use crate::shapes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by document persistence.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON tree is missing fields, has ill-typed fields, or carries an
    /// unknown shape type. The whole decode fails; no partial document is
    /// produced.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A drawing document: an ordered stack of layers.
///
/// Layer order defines front-to-back stacking. The active-layer cursor
/// always references an existing layer, or is `None` when the document has
/// no layers; it is runtime state and is not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub layers: Vec<Layer>,
    #[serde(skip)]
    active_layer: Option<LayerId>,
}

impl Document {
    /// Create an empty document with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Append a new empty layer on top of the stack and make it active.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        let layer = Layer::new(name);
        let id = layer.id;
        self.layers.push(layer);
        self.active_layer = Some(id);
        id
    }

    /// Remove a layer. If it was active, the cursor falls back to the
    /// bottom-most remaining layer (or `None`).
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let pos = self.layers.iter().position(|l| l.id == id)?;
        let layer = self.layers.remove(pos);
        if self.active_layer == Some(id) {
            self.active_layer = self.layers.first().map(|l| l.id);
        }
        Some(layer)
    }

    /// Move a layer to a new stacking position. Out-of-range indices clamp
    /// to the top.
    pub fn move_layer(&mut self, id: LayerId, index: usize) -> bool {
        match self.layers.iter().position(|l| l.id == id) {
            Some(pos) => {
                let layer = self.layers.remove(pos);
                let index = index.min(self.layers.len());
                self.layers.insert(index, layer);
                true
            }
            None => false,
        }
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active_layer
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> bool {
        if self.layer(id).is_some() {
            self.active_layer = Some(id);
            true
        } else {
            false
        }
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.active_layer.and_then(|id| self.layer(id))
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        let id = self.active_layer?;
        self.layer_mut(id)
    }

    // ---- persistence ----------------------------------------------------

    /// Serialize the document to the JSON document format.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a document from JSON. Strict: any missing or ill-typed field,
    /// or an unrecognized shape `"type"`, fails the whole decode.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut document: Document = serde_json::from_str(json).map_err(|e| {
            log::warn!("document decode failed: {e}");
            DocumentError::from(e)
        })?;

        // Keep fresh ids clear of everything the file brought in.
        let max_layer = document.layers.iter().map(|l| l.id).max().unwrap_or(0);
        crate::layer::reserve_layer_ids(max_layer);
        let max_shape = document
            .layers
            .iter()
            .flat_map(|l| l.shapes.iter().map(|s| s.id()))
            .max()
            .unwrap_or(0);
        shapes::reserve_shape_ids(max_shape);

        document.active_layer = document.layers.first().map(|l| l.id);
        Ok(document)
    }

    /// Replace this document with one decoded from `json`. On failure the
    /// current document is left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        *self = Self::from_json(json)?;
        Ok(())
    }
}
