//! Permission aggregation.
//!
//! This module computes a principal's effective permissions: the union of
//! the permissions of every assigned role, plus the role ids themselves.

use clearance_core::error::Result;
use clearance_core::id::UserId;
use clearance_core::traits::{RoleStore, UserStore};
use clearance_core::types::{Role, User};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::model::EffectivePermissions;

/// The effective permissions conferred by `roles`.
///
/// Each role contributes its id and every permission it grants.
pub fn effective_permissions<'a>(roles: impl IntoIterator<Item = &'a Role>) -> EffectivePermissions {
    let mut permissions = EffectivePermissions::new();
    for role in roles {
        permissions.insert(role.id.clone());
        permissions.extend(role.permissions.iter().cloned());
    }
    permissions
}

/// A permission aggregator.
///
/// Every call reads the user and their roles from the stores, so the result
/// reflects role assignments as they are at that moment. Callers resolve once
/// per operation and pass the result to each decision.
#[derive(Clone)]
pub struct PermissionAggregator {
    /// The user store.
    users: Arc<dyn UserStore>,

    /// The role store.
    roles: Arc<dyn RoleStore>,
}

impl PermissionAggregator {
    /// Create a new permission aggregator.
    ///
    /// # Arguments
    ///
    /// * `users` - The user store.
    /// * `roles` - The role store.
    pub fn new(users: Arc<dyn UserStore>, roles: Arc<dyn RoleStore>) -> Self {
        Self { users, roles }
    }

    /// Resolve the effective permissions of a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The ID of the acting user.
    ///
    /// # Returns
    ///
    /// * `Ok(EffectivePermissions)` - The union over the user's roles.
    /// * `Err` - If the user does not exist or a store fails.
    pub fn resolve(&self, user_id: &UserId) -> Result<EffectivePermissions> {
        let user = self.users.get_user(user_id)?;
        self.resolve_user(&user)
    }

    /// Resolve the effective permissions of an already loaded user.
    ///
    /// Role ids that no longer resolve to a stored role are skipped.
    pub fn resolve_user(&self, user: &User) -> Result<EffectivePermissions> {
        let mut roles = Vec::with_capacity(user.roles.len());
        for role_id in &user.roles {
            match self.roles.get_role(role_id) {
                Ok(role) => roles.push(role),
                Err(err) if err.is_not_found() => {
                    warn!("User {} holds unknown role {}; skipping", user.email, role_id);
                }
                Err(err) => return Err(err),
            }
        }

        let permissions = effective_permissions(&roles);
        debug!(
            "Resolved {} effective permissions for {}",
            permissions.len(),
            user.email
        );
        Ok(permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryRoleStore, InMemoryUserStore};
    use clearance_core::types::{NewUser, Permission, PermissionId};

    fn role(id: &str, permissions: &[&str]) -> Role {
        Role::new(id, permissions.iter().copied().map(PermissionId::from))
    }

    #[test]
    fn test_effective_permissions_include_role_ids() {
        let roles = [
            role("secretUser", &["readSecret", "writeSecret"]),
            role("secretAdmin", &["downgradeSecret", "upgradeConfidential"]),
        ];
        let permissions = effective_permissions(&roles);
        assert_eq!(permissions.len(), 6);
        assert!(permissions.contains("secretUser"));
        assert!(permissions.contains("secretAdmin"));
        assert!(permissions.contains("upgradeConfidential"));
    }

    #[test]
    fn test_effective_permissions_of_no_roles_is_empty() {
        assert!(effective_permissions(&Vec::<Role>::new()).is_empty());
    }

    #[test]
    fn test_resolve_reads_current_assignments() {
        let users = Arc::new(InMemoryUserStore::new());
        let roles = Arc::new(InMemoryRoleStore::new());
        roles.add_role(role("secretUser", &["readSecret"])).unwrap();

        let user = User::new(NewUser::new(
            "Secret",
            "User",
            "secret.user@email.com",
            "hash",
            ["secretUser", "retiredRole"],
        ));
        let user_id = user.id;
        users.add_user(user).unwrap();

        let aggregator = PermissionAggregator::new(users, roles.clone());
        let before = aggregator.resolve(&user_id).unwrap();
        assert!(before.contains("readSecret"));
        assert!(!before.contains("retiredRole"));

        roles
            .replace_permissions("secretUser", vec![Permission::new("readTopSecret")])
            .unwrap();
        let after = aggregator.resolve(&user_id).unwrap();
        assert!(!after.contains("readSecret"));
        assert!(after.contains("readTopSecret"));
    }

    #[test]
    fn test_resolve_unknown_user() {
        let aggregator = PermissionAggregator::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryRoleStore::new()),
        );
        let err = aggregator.resolve(&UserId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
