//! Permission identifiers.
//!
//! Label-scoped permissions are named `<action><LabelName>`, e.g.
//! `readSecret` or `downgradeTopSecret`. The link between a permission and
//! the documents it governs is that name, so ids are only ever built through
//! [`PermissionId::for_label`] and taken apart through [`PermissionId::parse`].

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use super::label::{validate_label_name, Direction, Label};

/// The administrative permission, outside the label scheme.
pub const ADMIN_PERMISSION: &str = "manageUsers";

/// An operation on a labelled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read the document
    Read,

    /// Modify, rename or delete the document
    Write,

    /// Move the document one level up
    Upgrade,

    /// Move the document one level down
    Downgrade,
}

impl Action {
    /// Every action, in catalog order.
    pub const ALL: [Action; 4] = [Self::Read, Self::Write, Self::Downgrade, Self::Upgrade];

    /// The prefix this action contributes to a permission id.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Upgrade => "upgrade",
            Self::Downgrade => "downgrade",
        }
    }

    /// The reclassification direction for upgrade and downgrade.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Upgrade => Some(Direction::Above),
            Self::Downgrade => Some(Direction::Below),
            Self::Read | Self::Write => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// The identifier of a permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

impl PermissionId {
    /// Wrap an arbitrary permission id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The canonical id granting `action` on documents labelled `label`.
    pub fn for_label(action: Action, label: &Label) -> Self {
        Self(format!("{}{}", action.prefix(), label.name()))
    }

    /// The administrative permission.
    pub fn admin() -> Self {
        Self(ADMIN_PERMISSION.to_string())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a label-scoped id into its action and label name.
    ///
    /// Returns `None` for ids outside the `<action><LabelName>` convention,
    /// such as the administrative permission or a role id.
    pub fn parse(&self) -> Option<(Action, &str)> {
        parse_permission(&self.0)
    }
}

/// Split a raw permission string into its action and label name.
pub fn parse_permission(id: &str) -> Option<(Action, &str)> {
    Action::ALL.iter().find_map(|action| {
        id.strip_prefix(action.prefix())
            .filter(|name| validate_label_name(name).is_ok())
            .map(|name| (*action, name))
    })
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PermissionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PermissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<PermissionId> for String {
    fn from(id: PermissionId) -> Self {
        id.0
    }
}

impl AsRef<str> for PermissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A permission as held in the permission store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// The permission's identifier
    pub id: PermissionId,
}

impl Permission {
    /// Create a permission from its id.
    pub fn new(id: impl Into<PermissionId>) -> Self {
        Self { id: id.into() }
    }

    /// The permission granting `action` on `label`.
    pub fn for_label(action: Action, label: &Label) -> Self {
        Self {
            id: PermissionId::for_label(action, label),
        }
    }
}
