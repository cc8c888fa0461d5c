//! Strongly-typed identifiers.
//!
//! Users and documents are identified by UUIDs wrapped in a phantom-typed
//! [`Id`], so a document id can never be passed where a user id is expected.
//! Labels are identified by their [`Rank`](crate::types::Rank), roles and
//! permissions by their string ids.
//!
//! # Examples
//!
//! ```
//! use clearance_core::id::{DocumentId, UserId};
//! use std::str::FromStr;
//!
//! let user = UserId::new();
//! let document = DocumentId::new();
//! assert_ne!(user.uuid(), document.uuid());
//!
//! let id_str = "550e8400-e29b-41d4-a716-446655440000";
//! let user = UserId::from_str(id_str).unwrap();
//! assert_eq!(user.to_string(), id_str);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: std::marker::PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an identifier from a specific UUID, e.g. one read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Marker type for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserMarker;
/// Identifier for a user.
pub type UserId = Id<UserMarker>;

/// Marker type for documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentMarker;
/// Identifier for a document.
pub type DocumentId = Id<DocumentMarker>;
