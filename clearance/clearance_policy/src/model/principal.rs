//! Effective permission sets.

use clearance_core::types::{Action, Label, PermissionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The permissions a principal acts with during one operation.
///
/// Holds permission ids and role ids alike; a role id can gate an operation
/// directly. Instances are built per operation and passed explicitly to each
/// decision, never kept in ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectivePermissions(BTreeSet<String>);

impl EffectivePermissions {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Whether the set grants `action` on documents labelled `label`.
    pub fn grants(&self, action: Action, label: &Label) -> bool {
        self.contains(PermissionId::for_label(action, label).as_str())
    }

    /// Add an id.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.0.insert(id.into())
    }

    /// The union of this set and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EffectivePermissions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for EffectivePermissions {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grants_matches_label_scoped_id() {
        let secret = Label::new(3, "Secret").unwrap();
        let permissions: EffectivePermissions = ["readSecret", "secretUser"].into_iter().collect();
        assert!(permissions.grants(Action::Read, &secret));
        assert!(!permissions.grants(Action::Write, &secret));
        assert!(permissions.contains("secretUser"));
    }

    #[test]
    fn test_union() {
        let a: EffectivePermissions = ["readSecret"].into_iter().collect();
        let b: EffectivePermissions = ["writeSecret", "readSecret"].into_iter().collect();
        let union = a.union(&b);
        assert_eq!(union.iter().collect::<Vec<_>>(), vec!["readSecret", "writeSecret"]);
    }
}
