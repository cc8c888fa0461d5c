//! # Clearance Core
//!
//! `clearance_core` provides the fundamental building blocks for the Clearance
//! mandatory access control system: error types, identifiers, the data model
//! for labelled documents, and the interfaces of the collaborator stores.
//!
//! ## Model
//!
//! 1. **Labels** form a totally ordered hierarchy of classification levels,
//!    ordered by a numeric [`Rank`]. Ranks need not be contiguous.
//!
//! 2. **Permissions** are atomic capability strings. Label-scoped permissions
//!    are always derived from an [`Action`] and a [`Label`], never assembled by
//!    hand:
//!    ```text
//!    permission_id(action, label) := prefix(action) ++ label.name
//!    ```
//!
//! 3. **Roles** bundle permissions; **users** hold roles. A user's effective
//!    permissions are the union over their roles and are recomputed for every
//!    operation.
//!
//! 4. **Documents** carry exactly one label. The label only changes through
//!    reclassification, one step at a time.
//!
//! ## Crate Structure
//!
//! - **error**: Error types shared by all Clearance crates
//! - **id**: Strongly-typed identifier types
//! - **types**: Data model
//! - **traits**: Collaborator store interfaces

pub mod error;
pub mod id;
pub mod traits;
pub mod types;

pub use error::{Error, LabelError, ReclassificationError, Result, StoreError};
pub use id::{DocumentId, UserId};
pub use traits::{DocumentStore, LabelStore, PermissionStore, RoleStore, UserStore};
pub use types::{
    Action, Direction, Document, Label, NewDocument, Permission, PermissionId, Rank, Role,
    RoleId, User, ADMIN_PERMISSION,
};
