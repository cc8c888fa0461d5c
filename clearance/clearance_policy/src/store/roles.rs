//! In-memory role store.

use clearance_core::error::{Result, StoreError};
use clearance_core::traits::RoleStore;
use clearance_core::types::{Permission, Role};
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory role store.
#[derive(Clone)]
pub struct InMemoryRoleStore {
    /// The roles, indexed by ID.
    roles: Arc<DashMap<String, Role>>,
}

impl InMemoryRoleStore {
    /// Create a new in-memory role store.
    pub fn new() -> Self {
        Self {
            roles: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryRoleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleStore for InMemoryRoleStore {
    fn add_role(&self, role: Role) -> Result<()> {
        if self.roles.contains_key(&role.id) {
            return Err(StoreError::AlreadyExists(format!("Role {}", role.id)).into());
        }
        self.roles.insert(role.id.clone(), role);
        Ok(())
    }

    fn get_role(&self, id: &str) -> Result<Role> {
        self.roles
            .get(id)
            .map(|r| r.value().clone())
            .ok_or_else(|| StoreError::RoleNotFound(id.to_string()).into())
    }

    fn replace_permissions(&self, id: &str, permissions: Vec<Permission>) -> Result<Role> {
        let mut role = self
            .roles
            .get_mut(id)
            .ok_or_else(|| StoreError::RoleNotFound(id.to_string()))?;
        role.replace_permissions(permissions.into_iter().map(|p| p.id));
        Ok(role.value().clone())
    }

    fn list_roles(&self) -> Result<Vec<Role>> {
        let mut roles: Vec<Role> = self.roles.iter().map(|r| r.value().clone()).collect();
        roles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(roles)
    }
}
