//! Error types for the Clearance system.
//!
//! The errors are organized by concern, with the root [`Error`] able to wrap
//! any of them so callers can handle failures uniformly at the top level.
//!
//! Authorization denial is deliberately absent here: a missing permission is
//! an ordinary `false` from a decision predicate, not an error.

use crate::id::{DocumentId, UserId};
use crate::types::{Label, Rank};
use thiserror::Error;

/// Root error type for the Clearance system.
#[derive(Debug, Error)]
pub enum Error {
    /// Label hierarchy errors
    #[error("Label error: {0}")]
    Label(#[from] LabelError),

    /// Collaborator store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A document could not be moved past the end of the hierarchy
    #[error("Reclassification rejected: {0}")]
    Reclassification(#[from] ReclassificationError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether this error is a lookup failure for a missing entity.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Label(err) => matches!(err, LabelError::NotFound(_) | LabelError::RankNotFound(_)),
            Self::Store(err) => err.is_not_found(),
            _ => false,
        }
    }
}

/// Errors related to labels and the label hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// No label with the given name exists
    #[error("Label not found: {0}")]
    NotFound(String),

    /// No label with the given rank exists
    #[error("No label with rank {0}")]
    RankNotFound(Rank),

    /// The label name cannot be used to build permission identifiers
    #[error("Invalid label name: {0:?}")]
    InvalidName(String),

    /// Two labels share a rank
    #[error("Duplicate label rank: {0}")]
    DuplicateRank(Rank),

    /// Two labels share a name
    #[error("Duplicate label name: {0}")]
    DuplicateName(String),

    /// A role id derived from a label name reads as a permission or a reserved role
    #[error("Role id {0} collides with a permission or reserved role")]
    RoleIdCollision(String),
}

/// Errors raised by the collaborator stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// User with the given ID was not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// No user is registered under the given email
    #[error("No user found with email `{0}`")]
    EmailNotFound(String),

    /// Document with the given ID was not found
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// No document has the given name
    #[error("Document not found: {0}")]
    DocumentNameNotFound(String),

    /// Role with the given ID was not found
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// Permission with the given ID was not found
    #[error("Permission not found: {0}")]
    PermissionNotFound(String),

    /// Another user already holds this email
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// An entity with the same key already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The stored state changed between read and commit
    #[error("Conflicting update: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Whether this error is a lookup failure for a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::EmailNotFound(_)
                | Self::DocumentNotFound(_)
                | Self::DocumentNameNotFound(_)
                | Self::RoleNotFound(_)
                | Self::PermissionNotFound(_)
        )
    }
}

/// A document cannot be moved one step past either end of the hierarchy.
///
/// This is a business outcome the caller is expected to surface, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReclassificationError {
    /// The document already carries the lowest label
    #[error("Document is already at the lowest level of classification.")]
    AlreadyLowest {
        /// The label the document carries
        label: Label,
    },

    /// The document already carries the highest label
    #[error("Document is already at the highest level of classification.")]
    AlreadyHighest {
        /// The label the document carries
        label: Label,
    },
}

impl ReclassificationError {
    /// The label the document was left at.
    pub fn label(&self) -> &Label {
        match self {
            Self::AlreadyLowest { label } | Self::AlreadyHighest { label } => label,
        }
    }
}

/// Result type for Clearance operations.
pub type Result<T> = std::result::Result<T, Error>;
