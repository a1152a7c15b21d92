//! Document entity models and the row/entity mapping.
//!
//! Rows come out of the store with every non-key column optional so that
//! validation is explicit: [`DocumentRecord::decode`] either produces a
//! scalar-validated [`DecodedDocument`] or a [`DecodeError`] naming exactly
//! the fields that failed. Owner resolution is NOT part of decoding -- a
//! decoded document still carries the raw owner id and becomes a
//! [`Document`] only once the service layer hydrates it with a resolved
//! identity. The write-side mapping ([`NewDocument`], [`UpdateDocument`])
//! is pure.

use coauthor_core::identity::Identity;
use coauthor_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The editor's document body: an ordered sequence of structured nodes.
/// Opaque to this service; stored as its JSON text encoding.
pub type NodeSequence = Vec<serde_json::Value>;

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// A raw `document` row, before validation.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRecord {
    pub id: DbId,
    pub title: Option<String>,
    pub owner: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified: Option<Timestamp>,
    pub content: Option<String>,
}

/// A raw listing-projection row (`id, title, created_at, modified`).
#[derive(Debug, Clone, FromRow)]
pub struct DocumentPreviewRecord {
    pub id: DbId,
    pub title: Option<String>,
    pub created_at: Option<Timestamp>,
    pub modified: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// A field of the `document` relation that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentField {
    Title,
    Owner,
    CreatedAt,
    Content,
}

impl DocumentField {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentField::Title => "title",
            DocumentField::Owner => "owner",
            DocumentField::CreatedAt => "created_at",
            DocumentField::Content => "content",
        }
    }
}

/// A row that could not be validated, with every failing field enumerated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document row {id} failed validation: {}", join_fields(.fields))]
pub struct DecodeError {
    /// Id of the offending row.
    pub id: DbId,
    pub fields: Vec<DocumentField>,
}

fn join_fields(fields: &[DocumentField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A scalar-validated document whose owner has not been resolved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDocument {
    pub id: DbId,
    pub title: String,
    /// Raw identity id as stored in the `owner` column.
    pub owner_id: String,
    pub created_at: Timestamp,
    pub modified: Option<Timestamp>,
    pub content: NodeSequence,
}

impl DecodedDocument {
    /// Attach the resolved owner identity, completing the domain entity.
    pub fn with_owner(self, owner: Identity) -> Document {
        Document {
            id: self.id,
            title: self.title,
            owner,
            created_at: self.created_at,
            modified: self.modified,
            content: self.content,
        }
    }
}

impl DocumentRecord {
    /// Validate scalar fields and parse the content sequence.
    ///
    /// Fail-closed: a missing title/owner/created_at, or content that is not
    /// a JSON sequence, is reported in the error rather than passed through.
    /// An absent `modified` and an empty sequence are both valid.
    pub fn decode(self) -> Result<DecodedDocument, DecodeError> {
        let mut fields = Vec::new();

        if self.title.is_none() {
            fields.push(DocumentField::Title);
        }
        if self.owner.is_none() {
            fields.push(DocumentField::Owner);
        }
        if self.created_at.is_none() {
            fields.push(DocumentField::CreatedAt);
        }
        let content = self
            .content
            .as_deref()
            .and_then(|raw| serde_json::from_str::<NodeSequence>(raw).ok());
        if content.is_none() {
            fields.push(DocumentField::Content);
        }

        match (self.title, self.owner, self.created_at, content) {
            (Some(title), Some(owner_id), Some(created_at), Some(content)) => {
                Ok(DecodedDocument {
                    id: self.id,
                    title,
                    owner_id,
                    created_at,
                    modified: self.modified,
                    content,
                })
            }
            _ => Err(DecodeError {
                id: self.id,
                fields,
            }),
        }
    }
}

impl DocumentPreviewRecord {
    /// Validate the projection fields. Same policy as [`DocumentRecord::decode`]
    /// but without content parsing or owner handling.
    pub fn decode(self) -> Result<DocumentPreview, DecodeError> {
        let mut fields = Vec::new();
        if self.title.is_none() {
            fields.push(DocumentField::Title);
        }
        if self.created_at.is_none() {
            fields.push(DocumentField::CreatedAt);
        }

        match (self.title, self.created_at) {
            (Some(title), Some(created_at)) => Ok(DocumentPreview {
                id: self.id,
                title,
                created_at,
                modified: self.modified,
            }),
            _ => Err(DecodeError {
                id: self.id,
                fields,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain entities
// ---------------------------------------------------------------------------

/// A fully hydrated document: owner resolved, content parsed.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: DbId,
    pub title: String,
    pub owner: Identity,
    pub created_at: Timestamp,
    pub modified: Option<Timestamp>,
    pub content: NodeSequence,
}

/// Lightweight projection for listings: no content, no resolved owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPreview {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub modified: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Write-side DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a document. The id is store-assigned and `created_at`
/// defaults to the insertion time; the owner travels as its raw id.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub owner_id: String,
    pub content: NodeSequence,
}

/// DTO for patching a document. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub content: Option<NodeSequence>,
}
