//! Reclassification.
//!
//! Moving a document exactly one level down or up the hierarchy. These
//! functions perform no authorization: callers check `can_downgrade` or
//! `can_upgrade` on the document's current label first.

use clearance_core::error::{ReclassificationError, Result};
use clearance_core::traits::LabelStore;
use clearance_core::types::{Direction, Document, Label};
use std::sync::Arc;
use tracing::debug;

use crate::model::LabelHierarchy;

fn rejection(direction: Direction, label: &Label) -> ReclassificationError {
    match direction {
        Direction::Below => ReclassificationError::AlreadyLowest {
            label: label.clone(),
        },
        Direction::Above => ReclassificationError::AlreadyHighest {
            label: label.clone(),
        },
    }
}

fn apply(
    document: &Document,
    direction: Direction,
    adjacent: Option<Label>,
) -> std::result::Result<Document, ReclassificationError> {
    match adjacent {
        Some(label) => {
            debug!(
                "Reclassifying {} from {} to {}",
                document.name,
                document.label(),
                label
            );
            Ok(document.clone().reclassified(label))
        }
        None => Err(rejection(direction, document.label())),
    }
}

/// Move `document` one level in `direction` within `hierarchy`.
///
/// The input is never modified; on rejection the caller still holds the
/// document exactly as it was.
pub fn reclassify(
    hierarchy: &LabelHierarchy,
    direction: Direction,
    document: &Document,
) -> std::result::Result<Document, ReclassificationError> {
    let adjacent = hierarchy
        .adjacent(direction, document.label().rank())
        .cloned();
    apply(document, direction, adjacent)
}

/// Move `document` to the nearest label below its own.
pub fn downgrade(
    hierarchy: &LabelHierarchy,
    document: &Document,
) -> std::result::Result<Document, ReclassificationError> {
    reclassify(hierarchy, Direction::Below, document)
}

/// Move `document` to the nearest label above its own.
pub fn upgrade(
    hierarchy: &LabelHierarchy,
    document: &Document,
) -> std::result::Result<Document, ReclassificationError> {
    reclassify(hierarchy, Direction::Above, document)
}

enum Labels {
    Store(Arc<dyn LabelStore>),
    Hierarchy(LabelHierarchy),
}

/// A reclassification engine.
///
/// Adjacency is looked up at call time, against the rank the document
/// carries at that moment. Committing the result is the caller's job; see
/// [`DocumentStore::replace_label`](clearance_core::traits::DocumentStore::replace_label).
pub struct Reclassifier {
    labels: Labels,
}

impl Reclassifier {
    /// Create a reclassifier reading adjacency from a label store.
    pub fn new(labels: Arc<dyn LabelStore>) -> Self {
        Self {
            labels: Labels::Store(labels),
        }
    }

    /// Create a reclassifier over a fixed hierarchy.
    pub fn with_hierarchy(hierarchy: LabelHierarchy) -> Self {
        Self {
            labels: Labels::Hierarchy(hierarchy),
        }
    }

    /// Move `document` one level in `direction`.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The document carrying the adjacent label.
    /// * `Err(Error::Reclassification)` - If no label lies in that direction.
    /// * `Err` - If the label store fails.
    pub fn reclassify(&self, direction: Direction, document: &Document) -> Result<Document> {
        let adjacent = match &self.labels {
            Labels::Store(store) => store.get_adjacent_label(direction, document.label().rank())?,
            Labels::Hierarchy(hierarchy) => hierarchy
                .adjacent(direction, document.label().rank())
                .cloned(),
        };
        Ok(apply(document, direction, adjacent)?)
    }

    /// Move `document` one level down.
    pub fn downgrade(&self, document: &Document) -> Result<Document> {
        self.reclassify(Direction::Below, document)
    }

    /// Move `document` one level up.
    pub fn upgrade(&self, document: &Document) -> Result<Document> {
        self.reclassify(Direction::Above, document)
    }
}
