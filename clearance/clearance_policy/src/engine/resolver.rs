//! Role-permission resolution.
//!
//! This module derives the permission sets of the standard roles from the
//! label hierarchy. The derivation runs when roles are seeded; requests only
//! ever see the stored result.

use clearance_core::error::LabelError;
use clearance_core::types::{parse_permission, Action, Label, PermissionId, Role};
use std::collections::BTreeSet;

use crate::model::{LabelHierarchy, PermissionCatalog};

/// Id of the role holding the administrative permission.
pub const SYSTEM_ADMIN_ROLE: &str = "systemAdmin";

/// Lower-case the first character of a label name.
///
/// `TopSecret` becomes `topSecret`, the stem of the level role ids.
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// A resolver for the standard roles of a hierarchy.
pub struct RolePermissionResolver<'h> {
    /// The hierarchy roles are derived from.
    hierarchy: &'h LabelHierarchy,

    /// The permission granted to the system administrator role.
    admin_permission: PermissionId,
}

impl<'h> RolePermissionResolver<'h> {
    /// Create a resolver using the default administrative permission.
    pub fn new(hierarchy: &'h LabelHierarchy) -> Self {
        Self {
            hierarchy,
            admin_permission: PermissionId::admin(),
        }
    }

    /// Create a resolver over a catalog's hierarchy and administrative permission.
    pub fn for_catalog(catalog: &'h PermissionCatalog) -> Self {
        Self {
            hierarchy: catalog.hierarchy(),
            admin_permission: catalog.admin_permission().clone(),
        }
    }

    /// The permissions a user cleared at `label` holds.
    ///
    /// # Arguments
    ///
    /// * `label` - The clearance level.
    ///
    /// # Returns
    ///
    /// `read<L>` for every label `L` ranked at or below `label`, plus
    /// `write<label>`. `read<label>` is always present, even if `label` is
    /// not part of the hierarchy.
    pub fn permissions_for_role_at_level(&self, label: &Label) -> BTreeSet<PermissionId> {
        let mut permissions: BTreeSet<PermissionId> = self
            .hierarchy
            .all_labels_up_to(label.rank())
            .map(|readable| PermissionId::for_label(Action::Read, readable))
            .collect();

        permissions.insert(PermissionId::for_label(Action::Read, label));
        permissions.insert(PermissionId::for_label(Action::Write, label));
        permissions
    }

    /// The id of the level role for `label`, e.g. `secretUser`.
    pub fn level_role_id(label: &Label) -> String {
        format!("{}User", lower_camel(label.name()))
    }

    /// The id of the level administrator role for `label`, e.g. `secretAdmin`.
    pub fn admin_role_id(label: &Label) -> String {
        format!("{}Admin", lower_camel(label.name()))
    }

    /// The standard role for users cleared at `label`.
    pub fn level_role(&self, label: &Label) -> Role {
        Role::new(
            Self::level_role_id(label),
            self.permissions_for_role_at_level(label),
        )
    }

    /// The administrator role for `label`.
    ///
    /// An administrator may move documents at `label` one step down and
    /// documents one step below `label` up into it. The lowest label has no
    /// administrator role.
    pub fn admin_role(&self, label: &Label) -> Option<Role> {
        let below = self.hierarchy.adjacent_below(label.rank())?;
        Some(Role::new(
            Self::admin_role_id(label),
            [
                PermissionId::for_label(Action::Downgrade, label),
                PermissionId::for_label(Action::Upgrade, below),
            ],
        ))
    }

    /// The role holding the administrative permission.
    pub fn system_admin_role(&self) -> Role {
        Role::new(SYSTEM_ADMIN_ROLE, [self.admin_permission.clone()])
    }

    /// Whether `role_id` would grant something if held as a permission.
    ///
    /// Role ids are part of a user's effective permissions, so an id that
    /// spells a label permission of this hierarchy, or the administrative
    /// permission, confers that permission on every holder.
    fn grants_as_permission(&self, role_id: &str) -> bool {
        let names_label = parse_permission(role_id)
            .map_or(false, |(_, name)| self.hierarchy.by_name(name).is_some());
        names_label || role_id == self.admin_permission.as_str()
    }

    /// Check that no standard role id can be read as a permission or shadows
    /// the system administrator role.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::RoleIdCollision`] naming the first offending id,
    /// e.g. `readOnlyUser` in a hierarchy holding both `ReadOnly` and
    /// `OnlyUser`.
    pub fn validate_role_ids(&self) -> Result<(), LabelError> {
        let mut ids = Vec::with_capacity(self.hierarchy.len() * 2);
        for label in self.hierarchy.iter() {
            ids.push(Self::level_role_id(label));
            if self.hierarchy.adjacent_below(label.rank()).is_some() {
                ids.push(Self::admin_role_id(label));
            }
        }

        let collides = |id: &String| id == SYSTEM_ADMIN_ROLE || self.grants_as_permission(id);
        match ids.into_iter().find(collides) {
            Some(id) => Err(LabelError::RoleIdCollision(id)),
            None => Ok(()),
        }
    }

    /// Every standard role: level roles and administrator roles in ascending
    /// label order, then the system administrator role.
    pub fn standard_roles(&self) -> Vec<Role> {
        let mut roles = Vec::with_capacity(self.hierarchy.len() * 2 + 1);
        for label in self.hierarchy.iter() {
            roles.push(self.level_role(label));
            if let Some(admin) = self.admin_role(label) {
                roles.push(admin);
            }
        }
        roles.push(self.system_admin_role());
        roles
    }
}

/// Every standard role of `hierarchy`, with the default administrative permission.
pub fn standard_roles(hierarchy: &LabelHierarchy) -> Vec<Role> {
    RolePermissionResolver::new(hierarchy).standard_roles()
}
