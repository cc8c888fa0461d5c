//! Permission catalog.
//!
//! The catalog is the fixed universe of permission ids derivable from a label
//! hierarchy: read, write, downgrade and upgrade for every level, except that
//! the lowest level has no downgrade and the highest no upgrade. One
//! administrative permission sits outside the label scheme.

use clearance_core::types::{Action, Label, Permission, PermissionId, ADMIN_PERMISSION};
use serde::Serialize;
use std::collections::HashSet;

use super::hierarchy::LabelHierarchy;

/// The label-scoped permission ids of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelPermissions {
    /// Read documents at this level
    pub read: PermissionId,

    /// Write documents at this level
    pub write: PermissionId,

    /// Move documents from this level one step down; absent at the lowest level
    pub downgrade: Option<PermissionId>,

    /// Move documents from this level one step up; absent at the highest level
    pub upgrade: Option<PermissionId>,
}

impl LabelPermissions {
    /// The permission id for `action`, if this level has one.
    pub fn get(&self, action: Action) -> Option<&PermissionId> {
        match action {
            Action::Read => Some(&self.read),
            Action::Write => Some(&self.write),
            Action::Downgrade => self.downgrade.as_ref(),
            Action::Upgrade => self.upgrade.as_ref(),
        }
    }

    /// The present ids in catalog order: read, write, downgrade, upgrade.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionId> + '_ {
        Action::ALL.into_iter().filter_map(move |action| self.get(action))
    }
}

/// Derive the permission ids of `label` within `hierarchy`.
///
/// Downgrade exists only if some label lies below `label`, upgrade only if
/// some label lies above it.
pub fn permissions_for_label(hierarchy: &LabelHierarchy, label: &Label) -> LabelPermissions {
    let scoped = |action| PermissionId::for_label(action, label);
    LabelPermissions {
        read: scoped(Action::Read),
        write: scoped(Action::Write),
        downgrade: hierarchy
            .adjacent_below(label.rank())
            .map(|_| scoped(Action::Downgrade)),
        upgrade: hierarchy
            .adjacent_above(label.rank())
            .map(|_| scoped(Action::Upgrade)),
    }
}

/// The universe of permissions for a hierarchy.
#[derive(Debug, Clone)]
pub struct PermissionCatalog {
    hierarchy: LabelHierarchy,
    admin_permission: PermissionId,
    permissions: Vec<PermissionId>,
    index: HashSet<PermissionId>,
}

impl PermissionCatalog {
    /// Build the catalog with the default administrative permission.
    pub fn for_hierarchy(hierarchy: &LabelHierarchy) -> Self {
        Self::with_admin_permission(hierarchy, PermissionId::new(ADMIN_PERMISSION))
    }

    /// Build the catalog with a custom administrative permission id.
    pub fn with_admin_permission(hierarchy: &LabelHierarchy, admin_permission: PermissionId) -> Self {
        let mut permissions: Vec<PermissionId> = hierarchy
            .iter()
            .flat_map(|label| {
                permissions_for_label(hierarchy, label)
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();
        permissions.push(admin_permission.clone());

        let index = permissions.iter().cloned().collect();

        Self {
            hierarchy: hierarchy.clone(),
            admin_permission,
            permissions,
            index,
        }
    }

    /// The hierarchy this catalog was derived from.
    pub fn hierarchy(&self) -> &LabelHierarchy {
        &self.hierarchy
    }

    /// The administrative permission id.
    pub fn admin_permission(&self) -> &PermissionId {
        &self.admin_permission
    }

    /// The label-scoped permission ids of one level.
    pub fn permissions_for_label(&self, label: &Label) -> LabelPermissions {
        permissions_for_label(&self.hierarchy, label)
    }

    /// Whether `id` belongs to the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// All ids: labels ascending, then the administrative permission.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionId> + '_ {
        self.permissions.iter()
    }

    /// Number of permissions in the catalog.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// The catalog as storable permissions.
    pub fn to_permissions(&self) -> Vec<Permission> {
        self.permissions.iter().cloned().map(Permission::new).collect()
    }
}
