//! Core data types.
//!
//! This module defines the data model shared by every Clearance crate:
//! labels and their ranks, permission identifiers, roles, users and
//! documents.

pub mod document;
pub mod label;
pub mod permission;
pub mod role;
pub mod user;

pub use document::{Document, NewDocument};
pub use label::{validate_label_name, Direction, Label, LabelRef, Rank};
pub use permission::{parse_permission, Action, Permission, PermissionId, ADMIN_PERMISSION};
pub use role::{Role, RoleId};
pub use user::{NewUser, User};
