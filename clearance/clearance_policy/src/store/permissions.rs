//! In-memory permission store.

use clearance_core::error::{Result, StoreError};
use clearance_core::traits::{LabelStore, PermissionStore};
use clearance_core::types::{Action, Permission, PermissionId, Rank};
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory permission store.
///
/// Label-scoped queries consult the label store the permissions were
/// derived from.
#[derive(Clone)]
pub struct InMemoryPermissionStore {
    /// The permissions, indexed by ID.
    permissions: Arc<DashMap<String, Permission>>,

    /// The label store.
    labels: Arc<dyn LabelStore>,
}

impl InMemoryPermissionStore {
    /// Create a new in-memory permission store.
    pub fn new(labels: Arc<dyn LabelStore>) -> Self {
        Self {
            permissions: Arc::new(DashMap::new()),
            labels,
        }
    }
}

impl PermissionStore for InMemoryPermissionStore {
    fn add_permission(&self, permission: Permission) -> Result<()> {
        let id = permission.id.as_str().to_string();
        if self.permissions.contains_key(&id) {
            return Err(StoreError::AlreadyExists(format!("Permission {}", id)).into());
        }
        self.permissions.insert(id, permission);
        Ok(())
    }

    fn get_permission(&self, id: &str) -> Result<Permission> {
        self.permissions
            .get(id)
            .map(|p| p.value().clone())
            .ok_or_else(|| StoreError::PermissionNotFound(id.to_string()).into())
    }

    fn list_permissions(&self) -> Result<Vec<Permission>> {
        let mut permissions: Vec<Permission> =
            self.permissions.iter().map(|p| p.value().clone()).collect();
        permissions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(permissions)
    }

    fn list_permissions_for_labels_at_or_below(&self, rank: Rank) -> Result<Vec<Permission>> {
        let permissions = self
            .labels
            .list_labels_at_or_below(rank)?
            .iter()
            .map(|label| PermissionId::for_label(Action::Read, label))
            .filter_map(|id| self.permissions.get(id.as_str()).map(|p| p.value().clone()))
            .collect();
        Ok(permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelHierarchy, PermissionCatalog};
    use crate::store::InMemoryLabelStore;

    fn seeded() -> InMemoryPermissionStore {
        let hierarchy =
            LabelHierarchy::from_names(["Unclassified", "Confidential", "Secret", "TopSecret"])
                .unwrap();
        let catalog = PermissionCatalog::for_hierarchy(&hierarchy);
        let store =
            InMemoryPermissionStore::new(Arc::new(InMemoryLabelStore::from_hierarchy(hierarchy)));
        for permission in catalog.to_permissions() {
            store.add_permission(permission).unwrap();
        }
        store
    }

    #[test]
    fn test_read_permissions_at_or_below() {
        let store = seeded();
        let ids: Vec<String> = store
            .list_permissions_for_labels_at_or_below(Rank::new(2))
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["readUnclassified", "readConfidential"]);
    }

    #[test]
    fn test_duplicate_and_missing() {
        let store = seeded();
        assert!(store.add_permission(Permission::new("manageUsers")).is_err());
        assert!(store.get_permission("upgradeTopSecret").unwrap_err().is_not_found());
        assert_eq!(store.list_permissions().unwrap().len(), 15);
    }
}
