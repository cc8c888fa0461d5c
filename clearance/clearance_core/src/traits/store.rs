//! Store traits.
//!
//! Each trait covers one entity of the data model. Lookups of missing
//! entities fail with a not-found [`StoreError`](crate::error::StoreError)
//! or [`LabelError`](crate::error::LabelError), which callers keep distinct
//! from authorization denials.

use crate::error::Result;
use crate::id::{DocumentId, UserId};
use crate::types::{Direction, Document, Label, Permission, Rank, Role, User};

/// Trait for label storage.
///
/// A label store holds the classification hierarchy, ordered by rank.
pub trait LabelStore: Send + Sync {
    /// Add a label to the store.
    ///
    /// # Arguments
    ///
    /// * `label` - The label to add.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the label was added.
    /// * `Err` - If a label with the same rank or name already exists.
    fn add_label(&self, label: Label) -> Result<()>;

    /// Get the label with the given rank.
    ///
    /// # Returns
    ///
    /// * `Ok(Label)` - The label.
    /// * `Err` - If no label has this rank.
    fn get_label_by_rank(&self, rank: Rank) -> Result<Label>;

    /// Get the label with the given name.
    ///
    /// # Returns
    ///
    /// * `Ok(Label)` - The label.
    /// * `Err` - If no label has this name.
    fn get_label_by_name(&self, name: &str) -> Result<Label>;

    /// List all labels in ascending rank order.
    fn list_labels(&self) -> Result<Vec<Label>>;

    /// List the labels whose rank is at or below `rank`, ascending.
    fn list_labels_at_or_below(&self, rank: Rank) -> Result<Vec<Label>>;

    /// Get the nearest label strictly below or above `rank`.
    ///
    /// # Arguments
    ///
    /// * `direction` - Which side of `rank` to search.
    /// * `rank` - The reference rank. It need not belong to a stored label.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Label))` - The adjacent label.
    /// * `Ok(None)` - If no label lies on that side of `rank`.
    fn get_adjacent_label(&self, direction: Direction, rank: Rank) -> Result<Option<Label>>;
}

/// Trait for permission storage.
pub trait PermissionStore: Send + Sync {
    /// Add a permission. Adding an existing id fails.
    fn add_permission(&self, permission: Permission) -> Result<()>;

    /// Get a permission by id.
    fn get_permission(&self, id: &str) -> Result<Permission>;

    /// List all permissions, sorted by id.
    fn list_permissions(&self) -> Result<Vec<Permission>>;

    /// List the read permissions of every label at or below `rank`.
    ///
    /// Only permissions that are actually stored are returned.
    fn list_permissions_for_labels_at_or_below(&self, rank: Rank) -> Result<Vec<Permission>>;
}

/// Trait for role storage.
pub trait RoleStore: Send + Sync {
    /// Add a role. Adding an existing id fails.
    fn add_role(&self, role: Role) -> Result<()>;

    /// Get a role by id.
    fn get_role(&self, id: &str) -> Result<Role>;

    /// Replace a role's permission set wholesale.
    ///
    /// # Returns
    ///
    /// * `Ok(Role)` - The updated role.
    /// * `Err` - If the role does not exist.
    fn replace_permissions(&self, id: &str, permissions: Vec<Permission>) -> Result<Role>;

    /// List all roles, sorted by id.
    fn list_roles(&self) -> Result<Vec<Role>>;
}

/// Trait for user storage.
///
/// Implementations enforce email uniqueness, comparing emails
/// case-insensitively.
pub trait UserStore: Send + Sync {
    /// Add a user.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the user was added.
    /// * `Err` - If the email is already registered.
    fn add_user(&self, user: User) -> Result<()>;

    /// Get a user by id.
    fn get_user(&self, id: &UserId) -> Result<User>;

    /// Get a user by email, case-insensitively.
    fn get_user_by_email(&self, email: &str) -> Result<User>;

    /// List all users.
    fn list_users(&self) -> Result<Vec<User>>;

    /// Overwrite a stored user.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user.
    /// * `Err` - If the user does not exist or the new email is taken.
    fn update_user(&self, user: User) -> Result<User>;

    /// Remove a user.
    fn remove_user(&self, id: &UserId) -> Result<()>;
}

/// Trait for document storage.
pub trait DocumentStore: Send + Sync {
    /// Add a document.
    fn add_document(&self, document: Document) -> Result<()>;

    /// Get a document by id.
    fn get_document(&self, id: &DocumentId) -> Result<Document>;

    /// Get a document by name.
    fn get_document_by_name(&self, name: &str) -> Result<Document>;

    /// List all documents.
    fn list_documents(&self) -> Result<Vec<Document>>;

    /// Overwrite a stored document's name and contents.
    ///
    /// The stored label is kept; labels only change through
    /// [`replace_label`](DocumentStore::replace_label).
    fn update_document(&self, document: Document) -> Result<Document>;

    /// Commit a reclassification.
    ///
    /// The label is replaced only if the stored document still carries a
    /// label of rank `expected`, so two concurrent reclassifications of the
    /// same document cannot both apply.
    ///
    /// # Arguments
    ///
    /// * `id` - The document to reclassify.
    /// * `expected` - The rank the caller based its decision on.
    /// * `label` - The new label.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The updated document.
    /// * `Err` - If the document is missing, or its label changed since it
    ///   was read.
    fn replace_label(&self, id: &DocumentId, expected: Rank, label: Label) -> Result<Document>;

    /// Remove a document.
    fn remove_document(&self, id: &DocumentId) -> Result<()>;
}
