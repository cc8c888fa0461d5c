//! Document service.
//!
//! Reads and writes are gated on the document's current label; listings are
//! filtered to the labels the caller can read. Reclassification is committed
//! against the label rank the decision was based on.

use clearance_core::id::DocumentId;
use clearance_core::types::{Action, Direction, Document, Label, LabelRef, NewDocument};
use clearance_policy::{
    can, readable_label_names, EffectivePermissions, PermissionAggregator, Reclassifier, Stores,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{Principal, ServiceError};

type Result<T> = std::result::Result<T, ServiceError>;

/// What a caller may do with one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentAccess {
    /// The document's name
    pub document: String,

    /// The document's current label
    pub label: String,

    /// Whether the caller may read it
    pub read: bool,

    /// Whether the caller may modify or delete it
    pub write: bool,

    /// Whether the caller may move it one level up
    pub upgrade: bool,

    /// Whether the caller may move it one level down
    pub downgrade: bool,
}

/// A document moved one level, with the label it left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reclassification {
    /// The label the document carried before the move
    pub from: Label,

    /// The document as committed
    pub document: Document,
}

/// A document service.
pub struct DocumentService {
    /// The stores.
    stores: Stores,

    /// Resolves callers' effective permissions.
    aggregator: PermissionAggregator,

    /// Computes adjacent labels.
    reclassifier: Reclassifier,
}

impl DocumentService {
    /// Create a new document service over `stores`.
    pub fn new(stores: Stores) -> Self {
        Self {
            aggregator: PermissionAggregator::new(stores.users.clone(), stores.roles.clone()),
            reclassifier: Reclassifier::new(stores.labels.clone()),
            stores,
        }
    }

    fn permissions(&self, principal: &Principal) -> Result<EffectivePermissions> {
        Ok(self.aggregator.resolve(&principal.user_id)?)
    }

    fn authorize(&self, principal: &Principal, action: Action, document: &Document) -> Result<()> {
        let permissions = self.permissions(principal)?;
        if can(action, &permissions, document) {
            Ok(())
        } else {
            info!(
                "Denied {} on {} ({}) to {}",
                action,
                document.name,
                document.label(),
                principal.user_id
            );
            Err(ServiceError::Forbidden)
        }
    }

    fn load(&self, principal: &Principal, id: &DocumentId, action: Action) -> Result<Document> {
        let document = self.stores.documents.get_document(id)?;
        self.authorize(principal, action, &document)?;
        Ok(document)
    }

    fn resolve_label(&self, label: &LabelRef) -> Result<Label> {
        let label = match label {
            LabelRef::Rank(rank) => self.stores.labels.get_label_by_rank(*rank)?,
            LabelRef::Name(name) => self.stores.labels.get_label_by_name(name)?,
        };
        Ok(label)
    }

    /// Every document the caller can read.
    pub fn list(&self, principal: &Principal) -> Result<Vec<Document>> {
        let readable = readable_label_names(&self.permissions(principal)?);
        let documents: Vec<Document> = self
            .stores
            .documents
            .list_documents()?
            .into_iter()
            .filter(|document| readable.contains(document.label().name()))
            .collect();

        debug!(
            "Listing {} documents for {}",
            documents.len(),
            principal.user_id
        );
        Ok(documents)
    }

    /// Get a document by id.
    pub fn get(&self, principal: &Principal, id: &DocumentId) -> Result<Document> {
        self.load(principal, id, Action::Read)
    }

    /// Get a document by name.
    pub fn get_by_name(&self, principal: &Principal, name: &str) -> Result<Document> {
        let document = self.stores.documents.get_document_by_name(name)?;
        self.authorize(principal, Action::Read, &document)?;
        Ok(document)
    }

    /// Report which actions the caller may perform on the named document.
    ///
    /// This never fails with [`ServiceError::Forbidden`].
    pub fn check(&self, principal: &Principal, name: &str) -> Result<DocumentAccess> {
        let document = self.stores.documents.get_document_by_name(name)?;
        let permissions = self.permissions(principal)?;
        Ok(DocumentAccess {
            read: can(Action::Read, &permissions, &document),
            write: can(Action::Write, &permissions, &document),
            upgrade: can(Action::Upgrade, &permissions, &document),
            downgrade: can(Action::Downgrade, &permissions, &document),
            label: document.label().name().to_string(),
            document: document.name,
        })
    }

    /// Create a document.
    ///
    /// The requested label must exist, and the caller must be able to write
    /// documents at that label.
    pub fn create(&self, principal: &Principal, new_document: NewDocument) -> Result<Document> {
        if new_document.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Document name cannot be empty".to_string()));
        }

        let label = self.resolve_label(&new_document.label)?;
        let document = Document::new(new_document.name, label, new_document.contents);
        self.authorize(principal, Action::Write, &document)?;

        self.stores.documents.add_document(document.clone())?;
        info!("Created {} at {}", document.name, document.label());
        Ok(document)
    }

    /// Rename a document.
    pub fn rename(&self, principal: &Principal, id: &DocumentId, name: &str) -> Result<Document> {
        if name.trim().is_empty() {
            return Err(ServiceError::Invalid("Document name cannot be empty".to_string()));
        }

        let mut document = self.load(principal, id, Action::Write)?;
        document.name = name.to_string();
        Ok(self.stores.documents.update_document(document)?)
    }

    /// Replace a document's contents.
    pub fn update_contents(
        &self,
        principal: &Principal,
        id: &DocumentId,
        contents: &str,
    ) -> Result<Document> {
        let mut document = self.load(principal, id, Action::Write)?;
        document.contents = contents.to_string();
        Ok(self.stores.documents.update_document(document)?)
    }

    /// Delete a document.
    pub fn delete(&self, principal: &Principal, id: &DocumentId) -> Result<()> {
        let document = self.load(principal, id, Action::Write)?;
        self.stores.documents.remove_document(&document.id)?;
        info!("Deleted {}", document.name);
        Ok(())
    }

    /// Move a document one level down.
    pub fn downgrade(&self, principal: &Principal, id: &DocumentId) -> Result<Document> {
        let document = self.stores.documents.get_document(id)?;
        Ok(self.reclassify(principal, document, Direction::Below)?.document)
    }

    /// Move a document one level up.
    pub fn upgrade(&self, principal: &Principal, id: &DocumentId) -> Result<Document> {
        let document = self.stores.documents.get_document(id)?;
        Ok(self.reclassify(principal, document, Direction::Above)?.document)
    }

    /// Move the named document one level down.
    ///
    /// Only the downgrade permission on the document's current label is
    /// required; the caller need not be able to read it.
    pub fn downgrade_by_name(
        &self,
        principal: &Principal,
        name: &str,
    ) -> Result<Reclassification> {
        let document = self.stores.documents.get_document_by_name(name)?;
        self.reclassify(principal, document, Direction::Below)
    }

    /// Move the named document one level up.
    ///
    /// Only the upgrade permission on the document's current label is
    /// required.
    pub fn upgrade_by_name(
        &self,
        principal: &Principal,
        name: &str,
    ) -> Result<Reclassification> {
        let document = self.stores.documents.get_document_by_name(name)?;
        self.reclassify(principal, document, Direction::Above)
    }

    fn reclassify(
        &self,
        principal: &Principal,
        document: Document,
        direction: Direction,
    ) -> Result<Reclassification> {
        let action = match direction {
            Direction::Below => Action::Downgrade,
            Direction::Above => Action::Upgrade,
        };

        self.authorize(principal, action, &document)?;
        let reclassified = match self.reclassifier.reclassify(direction, &document) {
            Ok(reclassified) => reclassified,
            Err(err) => {
                let err = ServiceError::from(err);
                if let ServiceError::Rejected(rejection) = &err {
                    info!("Rejected {} of {}: {}", action, document.name, rejection);
                }
                return Err(err);
            }
        };

        let committed = self
            .stores
            .documents
            .replace_label(
                &document.id,
                document.label().rank(),
                reclassified.label().clone(),
            )
            .map_err(|err| {
                let err = ServiceError::from(err);
                if matches!(err, ServiceError::Conflict(_)) {
                    warn!("Concurrent reclassification of {}", document.name);
                }
                err
            })?;

        info!(
            "{} {} from {} to {}",
            action,
            committed.name,
            document.label(),
            committed.label()
        );
        Ok(Reclassification {
            from: document.label().clone(),
            document: committed,
        })
    }
}
