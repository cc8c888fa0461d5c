//! Roles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::permission::PermissionId;

/// The identifier of a role.
///
/// Role ids double as coarse-grained permissions when a user's effective
/// permissions are computed.
pub type RoleId = String;

/// A named bundle of permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The role's identifier
    pub id: RoleId,

    /// The permissions granted by this role
    pub permissions: BTreeSet<PermissionId>,
}

impl Role {
    /// Create a role with the given permissions.
    pub fn new(id: impl Into<RoleId>, permissions: impl IntoIterator<Item = PermissionId>) -> Self {
        Self {
            id: id.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Replace this role's permissions wholesale.
    pub fn replace_permissions(&mut self, permissions: impl IntoIterator<Item = PermissionId>) {
        self.permissions = permissions.into_iter().collect();
    }

    /// Whether this role grants the given permission.
    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions_are_a_set() {
        let mut role = Role::new(
            "secretUser",
            ["readSecret", "writeSecret", "readSecret"]
                .into_iter()
                .map(PermissionId::from),
        );
        assert_eq!(role.permissions.len(), 2);
        assert!(role.grants("readSecret"));
        assert!(!role.grants("readTopSecret"));

        role.replace_permissions([PermissionId::from("readTopSecret")]);
        assert!(role.grants("readTopSecret"));
        assert!(!role.grants("readSecret"));
    }
}
