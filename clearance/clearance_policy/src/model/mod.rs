//! Policy model.
//!
//! This module defines the label hierarchy, the permission catalog derived
//! from it, and the effective permission set a principal acts with.

pub mod catalog;
pub mod hierarchy;
pub mod principal;

pub use catalog::{permissions_for_label, LabelPermissions, PermissionCatalog};
pub use hierarchy::LabelHierarchy;
pub use principal::EffectivePermissions;
