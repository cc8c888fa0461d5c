//! In-memory label store.

use clearance_core::error::{LabelError, Result};
use clearance_core::traits::LabelStore;
use clearance_core::types::{Direction, Label, Rank};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::model::LabelHierarchy;

/// An in-memory label store backed by a [`LabelHierarchy`].
#[derive(Clone, Default)]
pub struct InMemoryLabelStore {
    /// The hierarchy.
    hierarchy: Arc<RwLock<LabelHierarchy>>,
}

impl InMemoryLabelStore {
    /// Create an empty label store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a label store holding `hierarchy`.
    pub fn from_hierarchy(hierarchy: LabelHierarchy) -> Self {
        Self {
            hierarchy: Arc::new(RwLock::new(hierarchy)),
        }
    }

    /// A copy of the stored hierarchy.
    pub fn snapshot(&self) -> LabelHierarchy {
        self.hierarchy.read().clone()
    }
}

impl LabelStore for InMemoryLabelStore {
    fn add_label(&self, label: Label) -> Result<()> {
        self.hierarchy.write().insert(label)?;
        Ok(())
    }

    fn get_label_by_rank(&self, rank: Rank) -> Result<Label> {
        self.hierarchy
            .read()
            .by_rank(rank)
            .cloned()
            .ok_or_else(|| LabelError::RankNotFound(rank).into())
    }

    fn get_label_by_name(&self, name: &str) -> Result<Label> {
        self.hierarchy
            .read()
            .by_name(name)
            .cloned()
            .ok_or_else(|| LabelError::NotFound(name.to_string()).into())
    }

    fn list_labels(&self) -> Result<Vec<Label>> {
        Ok(self.hierarchy.read().iter().cloned().collect())
    }

    fn list_labels_at_or_below(&self, rank: Rank) -> Result<Vec<Label>> {
        Ok(self.hierarchy.read().all_labels_up_to(rank).cloned().collect())
    }

    fn get_adjacent_label(&self, direction: Direction, rank: Rank) -> Result<Option<Label>> {
        Ok(self.hierarchy.read().adjacent(direction, rank).cloned())
    }
}
