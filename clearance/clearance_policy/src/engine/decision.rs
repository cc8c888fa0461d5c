//! Access decisions.
//!
//! The predicates here are pure and total. A principal that lacks a
//! permission gets `false`, never an error.

use clearance_core::types::{parse_permission, Action, Document};
use std::collections::BTreeSet;
use tracing::trace;

use crate::model::EffectivePermissions;

/// Whether `permissions` allow `action` on `document`.
pub fn can(action: Action, permissions: &EffectivePermissions, document: &Document) -> bool {
    let allowed = permissions.grants(action, document.label());
    trace!(
        "{} on {} ({}): {}",
        action,
        document.name,
        document.label(),
        if allowed { "allowed" } else { "denied" }
    );
    allowed
}

/// Whether `permissions` allow reading `document`.
pub fn can_read(permissions: &EffectivePermissions, document: &Document) -> bool {
    can(Action::Read, permissions, document)
}

/// Whether `permissions` allow writing `document`.
pub fn can_write(permissions: &EffectivePermissions, document: &Document) -> bool {
    can(Action::Write, permissions, document)
}

/// Whether `permissions` allow moving `document` one level up.
pub fn can_upgrade(permissions: &EffectivePermissions, document: &Document) -> bool {
    can(Action::Upgrade, permissions, document)
}

/// Whether `permissions` allow moving `document` one level down.
pub fn can_downgrade(permissions: &EffectivePermissions, document: &Document) -> bool {
    can(Action::Downgrade, permissions, document)
}

/// The names of every label `permissions` can read.
///
/// Used to filter bulk listings; ids that are not read permissions are
/// ignored.
pub fn readable_label_names(permissions: &EffectivePermissions) -> BTreeSet<String> {
    permissions
        .iter()
        .filter_map(parse_permission)
        .filter(|(action, _)| *action == Action::Read)
        .map(|(_, name)| name.to_string())
        .collect()
}
