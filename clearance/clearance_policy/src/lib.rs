//! # Clearance Policy
//!
//! `clearance_policy` implements the mandatory access control rules over
//! labelled documents.
//!
//! Key concepts:
//!
//! 1. **Label Hierarchy**: an ordered set of classification levels with
//!    nearest-neighbour queries that never assume contiguous ranks.
//!
//! 2. **Permission Catalog**: the universe of permission ids derivable from
//!    the hierarchy, plus the administrative permission.
//!
//! 3. **Role-Permission Resolver**: the permissions a standard role at a given
//!    level holds (read everything at or below, write its own level).
//!
//! 4. **Access Decisions**: pure predicates over an explicit set of effective
//!    permissions and a document.
//!
//! 5. **Reclassification**: moving a document exactly one level up or down.
//!
//! 6. **Permission Aggregation**: the union of permissions over a user's
//!    roles, recomputed for every operation.

pub mod engine;
pub mod model;
pub mod store;

// Re-export key types and functions for convenience
pub use engine::{
    can, can_downgrade, can_read, can_upgrade, can_write, effective_permissions,
    readable_label_names, standard_roles, PermissionAggregator, Reclassifier,
    RolePermissionResolver,
};
pub use model::{EffectivePermissions, LabelHierarchy, LabelPermissions, PermissionCatalog};
pub use store::{
    InMemoryDocumentStore, InMemoryLabelStore, InMemoryPermissionStore, InMemoryRoleStore,
    InMemoryUserStore, Stores,
};
