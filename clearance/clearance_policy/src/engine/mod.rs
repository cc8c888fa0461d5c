//! Policy engine.
//!
//! This module provides the role resolver, the access decision predicates,
//! permission aggregation and reclassification.

mod aggregator;
mod decision;
mod proptests;
mod reclassify;
mod resolver;

pub use aggregator::{effective_permissions, PermissionAggregator};
pub use decision::{can, can_downgrade, can_read, can_upgrade, can_write, readable_label_names};
pub use reclassify::{downgrade, reclassify, upgrade, Reclassifier};
pub use resolver::{lower_camel, standard_roles, RolePermissionResolver, SYSTEM_ADMIN_ROLE};
