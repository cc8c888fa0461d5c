//! In-memory collaborator stores.
//!
//! This module provides in-memory implementations of the store traits from
//! `clearance_core`, and [`Stores`], the bundle the runtime hands around.

mod documents;
mod labels;
mod permissions;
mod roles;
mod users;

pub use documents::InMemoryDocumentStore;
pub use labels::InMemoryLabelStore;
pub use permissions::InMemoryPermissionStore;
pub use roles::InMemoryRoleStore;
pub use users::InMemoryUserStore;

use clearance_core::traits::{DocumentStore, LabelStore, PermissionStore, RoleStore, UserStore};
use std::sync::Arc;

/// Every collaborator store, shared behind trait objects.
#[derive(Clone)]
pub struct Stores {
    /// The label store.
    pub labels: Arc<dyn LabelStore>,

    /// The permission store.
    pub permissions: Arc<dyn PermissionStore>,

    /// The role store.
    pub roles: Arc<dyn RoleStore>,

    /// The user store.
    pub users: Arc<dyn UserStore>,

    /// The document store.
    pub documents: Arc<dyn DocumentStore>,
}

impl Stores {
    /// Create an empty set of in-memory stores.
    pub fn in_memory() -> Self {
        let labels: Arc<dyn LabelStore> = Arc::new(InMemoryLabelStore::new());
        Self {
            permissions: Arc::new(InMemoryPermissionStore::new(labels.clone())),
            labels,
            roles: Arc::new(InMemoryRoleStore::new()),
            users: Arc::new(InMemoryUserStore::new()),
            documents: Arc::new(InMemoryDocumentStore::new()),
        }
    }
}
