//! User service.
//!
//! Every operation here requires the administrative permission, except that a
//! caller may always look up their own record.

use std::collections::BTreeSet;

use clearance_core::id::UserId;
use clearance_core::types::{NewUser, PermissionId, RoleId, User};
use clearance_policy::{PermissionAggregator, Stores};
use tracing::info;

use super::{Principal, ServiceError};

type Result<T> = std::result::Result<T, ServiceError>;

/// A user service.
pub struct UserService {
    /// The stores.
    stores: Stores,

    /// Resolves callers' effective permissions.
    aggregator: PermissionAggregator,

    /// The permission gating user management.
    admin_permission: PermissionId,
}

impl UserService {
    /// Create a new user service over `stores`.
    pub fn new(stores: Stores, admin_permission: PermissionId) -> Self {
        Self {
            aggregator: PermissionAggregator::new(stores.users.clone(), stores.roles.clone()),
            stores,
            admin_permission,
        }
    }

    fn authorize(&self, principal: &Principal) -> Result<()> {
        let permissions = self.aggregator.resolve(&principal.user_id)?;
        if permissions.contains(self.admin_permission.as_str()) {
            Ok(())
        } else {
            info!("Denied user management to {}", principal.user_id);
            Err(ServiceError::Forbidden)
        }
    }

    fn validate_email(email: &str) -> Result<()> {
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ServiceError::Invalid(format!("Invalid email: {}", email))),
        }
    }

    fn ensure_roles_exist(&self, roles: &BTreeSet<RoleId>) -> Result<()> {
        for role in roles {
            self.stores.roles.get_role(role)?;
        }
        Ok(())
    }

    /// The caller's own record.
    pub fn me(&self, principal: &Principal) -> Result<User> {
        Ok(self.stores.users.get_user(&principal.user_id)?)
    }

    /// Every user.
    pub fn list(&self, principal: &Principal) -> Result<Vec<User>> {
        self.authorize(principal)?;
        Ok(self.stores.users.list_users()?)
    }

    /// Get a user by id.
    pub fn get(&self, principal: &Principal, id: &UserId) -> Result<User> {
        if *id != principal.user_id {
            self.authorize(principal)?;
        }
        Ok(self.stores.users.get_user(id)?)
    }

    /// Get a user by email, case-insensitively.
    pub fn get_by_email(&self, principal: &Principal, email: &str) -> Result<User> {
        self.authorize(principal)?;
        Ok(self.stores.users.get_user_by_email(email)?)
    }

    /// Register a user. Every requested role must exist.
    pub fn create(&self, principal: &Principal, new_user: NewUser) -> Result<User> {
        self.authorize(principal)?;
        Self::validate_email(&new_user.email)?;
        self.ensure_roles_exist(&new_user.roles)?;

        let user = User::new(new_user);
        self.stores.users.add_user(user.clone())?;
        info!("Created user {}", user.email);
        Ok(user)
    }

    /// Change a user's name.
    pub fn rename(
        &self,
        principal: &Principal,
        id: &UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<User> {
        self.authorize(principal)?;
        let mut user = self.stores.users.get_user(id)?;
        user.first_name = first_name.to_string();
        user.last_name = last_name.to_string();
        Ok(self.stores.users.update_user(user)?)
    }

    /// Change a user's email.
    pub fn change_email(&self, principal: &Principal, id: &UserId, email: &str) -> Result<User> {
        self.authorize(principal)?;
        Self::validate_email(email)?;
        let mut user = self.stores.users.get_user(id)?;
        user.email = email.to_string();
        Ok(self.stores.users.update_user(user)?)
    }

    /// Replace a user's password hash. Hashing happens before this call.
    pub fn change_password_hash(
        &self,
        principal: &Principal,
        id: &UserId,
        password_hash: &str,
    ) -> Result<User> {
        self.authorize(principal)?;
        let mut user = self.stores.users.get_user(id)?;
        user.password_hash = password_hash.to_string();
        Ok(self.stores.users.update_user(user)?)
    }

    /// Replace a user's roles wholesale. Every role must exist.
    pub fn assign_roles(
        &self,
        principal: &Principal,
        id: &UserId,
        roles: impl IntoIterator<Item = RoleId>,
    ) -> Result<User> {
        self.authorize(principal)?;
        let roles: BTreeSet<RoleId> = roles.into_iter().collect();
        self.ensure_roles_exist(&roles)?;

        let mut user = self.stores.users.get_user(id)?;
        user.roles = roles;
        let user = self.stores.users.update_user(user)?;
        info!("Assigned roles {:?} to {}", user.roles, user.email);
        Ok(user)
    }

    /// Delete a user.
    pub fn delete(&self, principal: &Principal, id: &UserId) -> Result<()> {
        self.authorize(principal)?;
        self.stores.users.remove_user(id)?;
        Ok(())
    }
}
