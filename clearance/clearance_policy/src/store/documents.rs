//! In-memory document store.

use clearance_core::error::{Result, StoreError};
use clearance_core::id::DocumentId;
use clearance_core::traits::DocumentStore;
use clearance_core::types::{Document, Label, Rank};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// An in-memory document store.
///
/// Document names are unique. They are kept in a secondary index so a name
/// is checked and claimed in one step.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    /// The documents, indexed by ID.
    documents: Arc<DashMap<DocumentId, Document>>,

    /// Document name to document ID.
    names: Arc<DashMap<String, DocumentId>>,
}

impl InMemoryDocumentStore {
    /// Create a new in-memory document store.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
            names: Arc::new(DashMap::new()),
        }
    }

    fn claim_name(&self, name: &str, owner: DocumentId) -> Result<()> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(entry) if *entry.get() != owner => {
                Err(StoreError::AlreadyExists(format!("Document {}", name)).into())
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(owner);
                Ok(())
            }
        }
    }

    fn release_name(&self, name: &str, owner: DocumentId) {
        self.names.remove_if(name, |_, id| *id == owner);
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn add_document(&self, document: Document) -> Result<()> {
        if self.documents.contains_key(&document.id) {
            return Err(StoreError::AlreadyExists(format!("Document {}", document.id)).into());
        }

        self.claim_name(&document.name, document.id)?;
        self.documents.insert(document.id, document);
        Ok(())
    }

    fn get_document(&self, id: &DocumentId) -> Result<Document> {
        self.documents
            .get(id)
            .map(|d| d.value().clone())
            .ok_or_else(|| StoreError::DocumentNotFound(*id).into())
    }

    fn get_document_by_name(&self, name: &str) -> Result<Document> {
        self.names
            .get(name)
            .map(|id| *id.value())
            .and_then(|id| self.documents.get(&id).map(|d| d.value().clone()))
            .ok_or_else(|| StoreError::DocumentNameNotFound(name.to_string()).into())
    }

    fn list_documents(&self) -> Result<Vec<Document>> {
        let mut documents: Vec<Document> =
            self.documents.iter().map(|d| d.value().clone()).collect();
        documents.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(documents)
    }

    fn update_document(&self, document: Document) -> Result<Document> {
        let mut stored = self
            .documents
            .get_mut(&document.id)
            .ok_or(StoreError::DocumentNotFound(document.id))?;

        if stored.name != document.name {
            self.claim_name(&document.name, document.id)?;
            self.release_name(&stored.name, document.id);
        }
        stored.name = document.name;
        stored.contents = document.contents;
        stored.touch();

        Ok(stored.value().clone())
    }

    fn replace_label(&self, id: &DocumentId, expected: Rank, label: Label) -> Result<Document> {
        let mut stored = self
            .documents
            .get_mut(id)
            .ok_or(StoreError::DocumentNotFound(*id))?;

        let current = stored.label().rank();
        if current != expected {
            debug!(
                "Refusing to relabel {}: expected rank {}, found {}",
                stored.name, expected, current
            );
            return Err(StoreError::Conflict(format!(
                "Document {} was reclassified concurrently",
                stored.name
            ))
            .into());
        }

        let updated = stored.value().clone().reclassified(label);
        *stored.value_mut() = updated.clone();

        Ok(updated)
    }

    fn remove_document(&self, id: &DocumentId) -> Result<()> {
        let (_, document) = self
            .documents
            .remove(id)
            .ok_or(StoreError::DocumentNotFound(*id))?;
        self.release_name(&document.name, *id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_core::error::Error;

    fn secret() -> Label {
        Label::new(3, "Secret").unwrap()
    }

    fn confidential() -> Label {
        Label::new(2, "Confidential").unwrap()
    }

    #[test]
    fn test_update_keeps_label() {
        let store = InMemoryDocumentStore::new();
        let document = Document::new("Document3.txt", secret(), "body");
        store.add_document(document.clone()).unwrap();

        let mut edited = document.clone().reclassified(confidential());
        edited.contents = "new body".to_string();
        let stored = store.update_document(edited).unwrap();

        assert_eq!(stored.contents, "new body");
        assert_eq!(stored.label(), &secret());
    }

    #[test]
    fn test_names_are_unique() {
        let store = InMemoryDocumentStore::new();
        store
            .add_document(Document::new("a.txt", secret(), ""))
            .unwrap();
        let other = Document::new("b.txt", secret(), "");
        store.add_document(other.clone()).unwrap();

        assert!(store
            .add_document(Document::new("a.txt", secret(), ""))
            .is_err());

        let mut renamed = other;
        renamed.name = "a.txt".to_string();
        assert!(store.update_document(renamed).is_err());
        assert_eq!(store.get_document_by_name("b.txt").unwrap().name, "b.txt");
    }

    #[test]
    fn test_names_are_released_on_rename_and_remove() {
        let store = InMemoryDocumentStore::new();
        let document = Document::new("draft.txt", secret(), "");
        store.add_document(document.clone()).unwrap();

        let mut renamed = document.clone();
        renamed.name = "final.txt".to_string();
        store.update_document(renamed).unwrap();
        assert!(store.get_document_by_name("draft.txt").unwrap_err().is_not_found());
        assert_eq!(store.get_document_by_name("final.txt").unwrap().id, document.id);

        store
            .add_document(Document::new("draft.txt", secret(), ""))
            .unwrap();

        store.remove_document(&document.id).unwrap();
        store
            .add_document(Document::new("final.txt", secret(), ""))
            .unwrap();
    }

    #[test]
    fn test_concurrent_adds_claim_a_name_once() {
        let store = InMemoryDocumentStore::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .add_document(Document::new("race.txt", secret(), ""))
                        .is_ok()
                })
            })
            .collect();
        let added = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(added, 1);
        assert_eq!(store.list_documents().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_renames_claim_a_name_once() {
        let store = InMemoryDocumentStore::new();
        let documents: Vec<Document> = (0..8)
            .map(|i| Document::new(format!("doc{}.txt", i), secret(), ""))
            .collect();
        for document in &documents {
            store.add_document(document.clone()).unwrap();
        }

        let handles: Vec<_> = documents
            .into_iter()
            .map(|mut document| {
                let store = store.clone();
                std::thread::spawn(move || {
                    document.name = "target.txt".to_string();
                    store.update_document(document).is_ok()
                })
            })
            .collect();
        let renamed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(renamed, 1);
        let names: Vec<String> = store
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .filter(|name| name == "target.txt")
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_replace_label_checks_expected_rank() {
        let store = InMemoryDocumentStore::new();
        let document = Document::new("Document3.txt", secret(), "body");
        store.add_document(document.clone()).unwrap();

        let updated = store
            .replace_label(&document.id, secret().rank(), confidential())
            .unwrap();
        assert_eq!(updated.label(), &confidential());

        // A second writer that read the old label loses.
        let err = store
            .replace_label(&document.id, secret().rank(), confidential())
            .unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Conflict(_))));
        assert_eq!(store.get_document(&document.id).unwrap().label(), &confidential());
    }

    #[test]
    fn test_missing_documents() {
        let store = InMemoryDocumentStore::new();
        let id = DocumentId::new();
        assert!(store.get_document(&id).unwrap_err().is_not_found());
        assert!(store.get_document_by_name("ghost.txt").unwrap_err().is_not_found());
        assert!(store.remove_document(&id).is_err());
    }
}
