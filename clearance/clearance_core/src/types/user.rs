//! Users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::role::RoleId;
use crate::id::UserId;

/// A user of the system.
///
/// A user holds roles by id; the permissions those roles carry are looked up
/// whenever the user acts, so changes to a role take effect on the next
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's identifier
    pub id: UserId,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Login email, unique across users and stored lower-case
    pub email: String,

    /// Opaque password hash produced by the authentication layer
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Assigned roles
    pub roles: BTreeSet<RoleId>,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last modified
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user from a registration request.
    pub fn new(new_user: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email.to_lowercase(),
            password_hash: new_user.password_hash,
            roles: new_user.roles,
            created_at: now,
            updated_at: now,
        }
    }

    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Mark the user as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The fields needed to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Login email
    pub email: String,

    /// Opaque password hash
    pub password_hash: String,

    /// Roles to assign
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
}

impl NewUser {
    /// Create a registration request with the given roles.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<RoleId>>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}
