//! Labelled documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::label::{Label, LabelRef};
use crate::id::DocumentId;

/// A document carrying exactly one classification label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The document's identifier
    pub id: DocumentId,

    /// The document's name
    pub name: String,

    label: Label,

    /// The document body
    pub contents: String,

    /// When the document was created
    pub created_at: DateTime<Utc>,

    /// When the document was last modified
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a document with a fresh id.
    pub fn new(name: impl Into<String>, label: Label, contents: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            name: name.into(),
            label,
            contents: contents.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The document's current label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Consume the document and return it carrying `label`.
    ///
    /// Reclassification is the only caller; it guarantees `label` is adjacent
    /// to the current one.
    pub fn reclassified(mut self, label: Label) -> Self {
        self.label = label;
        self.touch();
        self
    }

    /// Mark the document as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A request to create a document whose label has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    /// The document's name
    pub name: String,

    /// The requested label
    pub label: LabelRef,

    /// The document body
    pub contents: String,
}

impl NewDocument {
    /// Create a document request.
    pub fn new(name: impl Into<String>, label: LabelRef, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label,
            contents: contents.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reclassified_keeps_identity() {
        let secret = Label::new(3, "Secret").unwrap();
        let confidential = Label::new(2, "Confidential").unwrap();
        let document = Document::new("Document3.txt", secret, "body");
        let id = document.id;

        let document = document.reclassified(confidential.clone());
        assert_eq!(document.id, id);
        assert_eq!(document.label(), &confidential);
        assert_eq!(document.name, "Document3.txt");
        assert!(document.updated_at >= document.created_at);
    }
}
