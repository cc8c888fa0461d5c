//! Document and user services.
//!
//! The services sit between an authenticated caller and the stores. Each call
//! resolves the caller's effective permissions afresh, checks them with the
//! policy predicates, and only then touches the stores.

pub mod documents;
pub mod users;

pub use documents::{DocumentAccess, DocumentService, Reclassification};
pub use users::UserService;

use clearance_core::error::{Error, LabelError, ReclassificationError, StoreError};
use clearance_core::id::UserId;
use serde::{Deserialize, Serialize};

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// The acting user.
    pub user_id: UserId,
}

impl Principal {
    /// Act as `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Outcomes a service call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The caller lacks the permission the operation requires
    #[error("User does not have clearance to perform this operation.")]
    Forbidden,

    /// A referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// The document is already at the end of the hierarchy
    #[error(transparent)]
    Rejected(#[from] ReclassificationError),

    /// A concurrent change or a uniqueness constraint got in the way
    #[error("{0}")]
    Conflict(String),

    /// The request itself is malformed
    #[error("{0}")]
    Invalid(String),

    /// Any other store failure
    #[error(transparent)]
    Store(Error),
}

impl ServiceError {
    /// Whether the caller was denied.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}

impl From<Error> for ServiceError {
    fn from(err: Error) -> Self {
        if err.is_not_found() {
            return Self::NotFound(err.to_string());
        }
        match err {
            Error::Reclassification(rejection) => Self::Rejected(rejection),
            Error::Store(StoreError::Conflict(msg)) => Self::Conflict(msg),
            Error::Store(StoreError::DuplicateEmail(email)) => {
                Self::Conflict(format!("Email already registered: {}", email))
            }
            Error::Store(StoreError::AlreadyExists(what)) => {
                Self::Conflict(format!("{} already exists", what))
            }
            Error::Label(err @ LabelError::InvalidName(_)) => Self::Invalid(err.to_string()),
            other => Self::Store(other),
        }
    }
}
