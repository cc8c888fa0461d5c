//! Interfaces of the collaborator stores.
//!
//! The access-control core is pure computation; everything it reads comes
//! from these stores. Implementations decide how data is persisted and how
//! conflicting writes are serialized.

pub mod store;

pub use store::{DocumentStore, LabelStore, PermissionStore, RoleStore, UserStore};
