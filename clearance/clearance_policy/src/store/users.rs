//! In-memory user store.

use clearance_core::error::{Result, StoreError};
use clearance_core::id::UserId;
use clearance_core::traits::UserStore;
use clearance_core::types::User;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory user store.
///
/// Emails are kept in a secondary index so uniqueness is checked and claimed
/// in one step.
#[derive(Clone)]
pub struct InMemoryUserStore {
    /// The users, indexed by ID.
    users: Arc<DashMap<UserId, User>>,

    /// Lower-cased email to user ID.
    emails: Arc<DashMap<String, UserId>>,
}

impl InMemoryUserStore {
    /// Create a new in-memory user store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            emails: Arc::new(DashMap::new()),
        }
    }

    fn claim_email(&self, email: &str, owner: UserId) -> Result<()> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(entry) if *entry.get() != owner => {
                Err(StoreError::DuplicateEmail(email.to_string()).into())
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(owner);
                Ok(())
            }
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn add_user(&self, mut user: User) -> Result<()> {
        if self.users.contains_key(&user.id) {
            return Err(StoreError::AlreadyExists(format!("User {}", user.id)).into());
        }

        user.email = user.email.to_lowercase();
        self.claim_email(&user.email, user.id)?;
        self.users.insert(user.id, user);

        Ok(())
    }

    fn get_user(&self, id: &UserId) -> Result<User> {
        self.users
            .get(id)
            .map(|u| u.value().clone())
            .ok_or_else(|| StoreError::UserNotFound(*id).into())
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        let email = email.to_lowercase();
        let id = self
            .emails
            .get(&email)
            .map(|id| *id.value())
            .ok_or_else(|| StoreError::EmailNotFound(email.clone()))?;
        self.get_user(&id)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    fn update_user(&self, mut user: User) -> Result<User> {
        let previous_email = self
            .users
            .get(&user.id)
            .map(|u| u.email.clone())
            .ok_or(StoreError::UserNotFound(user.id))?;

        user.email = user.email.to_lowercase();
        if user.email != previous_email {
            self.claim_email(&user.email, user.id)?;
            self.emails.remove(&previous_email);
        }

        user.touch();
        self.users.insert(user.id, user.clone());

        Ok(user)
    }

    fn remove_user(&self, id: &UserId) -> Result<()> {
        let (_, user) = self
            .users
            .remove(id)
            .ok_or(StoreError::UserNotFound(*id))?;
        self.emails.remove(&user.email);

        Ok(())
    }
}
