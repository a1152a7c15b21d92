//! Document and collaborator operations.
//!
//! This is where ownership is enforced and where decoded rows are hydrated
//! with resolved identities. Handlers stay thin: they validate request
//! shape, call one method here, and translate the result.

use std::sync::Arc;

use coauthor_core::error::CoreError;
use coauthor_core::identity::{Identity, IdentityProvider};
use coauthor_core::types::DbId;
use coauthor_db::models::document::{
    Document, DocumentPreview, DocumentPreviewRecord, DocumentRecord, NewDocument, UpdateDocument,
};
use coauthor_db::repositories::{CollaboratorRepo, DocumentRepo};
use coauthor_db::DbPool;

use crate::error::{AppError, AppResult};

/// Result of an ownership-scoped delete.
///
/// The HTTP layer reports all three outcomes identically (the caller cannot
/// probe for foreign documents), but they are distinguished here so logs and
/// tests can tell a refused delete from a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The requester owned the document and it was removed.
    Deleted,
    /// The document exists but the requester is not its owner; nothing was
    /// removed.
    NotOwner,
    /// No document with that id exists.
    NotFound,
}

/// Document and collaborator operations over an injected pool and identity
/// provider.
#[derive(Clone)]
pub struct DocumentService {
    pool: DbPool,
    identity: Arc<dyn IdentityProvider>,
}

impl DocumentService {
    pub fn new(pool: DbPool, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { pool, identity }
    }

    /// Create a document owned by the requester, with empty content.
    /// Returns the store-assigned id.
    pub async fn create(&self, requester: &Identity, title: &str) -> AppResult<DbId> {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "title must not be empty".into(),
            )));
        }

        let input = NewDocument {
            title: title.to_string(),
            owner_id: requester.uid.clone(),
            content: Vec::new(),
        };
        let id = DocumentRepo::insert(&self.pool, &input).await?;
        tracing::info!(document_id = id, owner = %requester.uid, "document created");
        Ok(id)
    }

    /// Fetch and hydrate a document.
    ///
    /// Any authenticated caller may read any document by id; reads are not
    /// ownership-scoped. A missing row and a corrupt row both come back as
    /// `None` (the corrupt case is logged with its failing fields). Owner
    /// resolution failures propagate -- no fallback identity is substituted.
    pub async fn get(&self, id: DbId) -> AppResult<Option<Document>> {
        let Some(record) = DocumentRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        let decoded = match record.decode() {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(document_id = id, error = %err, "dropping corrupt document row");
                return Ok(None);
            }
        };

        let owner = self
            .identity
            .get_identity(&decoded.owner_id)
            .await
            .map_err(|e| {
                AppError::Core(CoreError::Internal(format!(
                    "owner of document {id} could not be resolved: {e}"
                )))
            })?;
        Ok(Some(decoded.with_owner(owner)))
    }

    /// List previews of the requester's own documents, newest first.
    pub async fn list_owned(&self, requester: &Identity) -> AppResult<Vec<DocumentPreview>> {
        let records = DocumentRepo::list_by_owner(&self.pool, &requester.uid).await?;
        Ok(Self::decode_previews(records))
    }

    /// List previews of documents shared with the requester through the
    /// collaborator relation, newest first.
    pub async fn list_shared(&self, requester: &Identity) -> AppResult<Vec<DocumentPreview>> {
        let records = DocumentRepo::list_shared_with(&self.pool, &requester.uid).await?;
        Ok(Self::decode_previews(records))
    }

    /// Patch a document's title and/or content.
    ///
    /// Allowed for the owner and for collaborators; bumps `modified` and
    /// returns the hydrated result.
    pub async fn update(
        &self,
        requester: &Identity,
        id: DbId,
        patch: &UpdateDocument,
    ) -> AppResult<Document> {
        let record = self.require_document(id).await?;
        self.authorize_owner_or_collaborator(&record, requester, "update")
            .await?;

        let updated = DocumentRepo::update(&self.pool, id, patch)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        let decoded = updated.decode().map_err(|e| {
            AppError::Core(CoreError::Internal(format!(
                "document {id} failed validation after update: {e}"
            )))
        })?;

        let owner = self
            .identity
            .get_identity(&decoded.owner_id)
            .await
            .map_err(|e| {
                AppError::Core(CoreError::Internal(format!(
                    "owner of document {id} could not be resolved: {e}"
                )))
            })?;
        tracing::info!(document_id = id, editor = %requester.uid, "document updated");
        Ok(decoded.with_owner(owner))
    }

    /// Delete a document, scoped by ownership.
    ///
    /// The `DELETE` statement itself keeps the `owner = requester` predicate,
    /// but the outcome is resolved explicitly first so a refused delete and a
    /// miss are distinguishable to callers and in logs.
    pub async fn delete(&self, requester: &Identity, id: DbId) -> AppResult<DeleteOutcome> {
        let Some(record) = DocumentRepo::find_by_id(&self.pool, id).await? else {
            tracing::info!(document_id = id, requester = %requester.uid, "delete miss: no such document");
            return Ok(DeleteOutcome::NotFound);
        };

        if record.owner.as_deref() != Some(requester.uid.as_str()) {
            tracing::info!(
                document_id = id,
                requester = %requester.uid,
                "delete refused: requester is not the owner"
            );
            return Ok(DeleteOutcome::NotOwner);
        }

        let removed = DocumentRepo::delete_owned(&self.pool, &requester.uid, id).await?;
        if removed {
            tracing::info!(document_id = id, owner = %requester.uid, "document deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            // The row vanished between the check and the delete.
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// List a document's collaborators as resolved identities.
    ///
    /// Restricted to the owner and existing collaborators. Identifiers the
    /// provider can no longer resolve are dropped from the result.
    pub async fn list_collaborators(
        &self,
        requester: &Identity,
        id: DbId,
    ) -> AppResult<Vec<Identity>> {
        let record = self.require_document(id).await?;
        self.authorize_owner_or_collaborator(&record, requester, "list collaborators")
            .await?;

        let user_ids = CollaboratorRepo::list_user_ids(&self.pool, id).await?;
        Ok(self.identity.get_identities(&user_ids).await?)
    }

    /// Grant a user collaborator access to a document. Owner only.
    ///
    /// The user id is resolved against the provider first, so granting to an
    /// unknown identity fails with not-found instead of storing a dangling
    /// reference. Re-granting is a no-op.
    pub async fn add_collaborator(
        &self,
        requester: &Identity,
        id: DbId,
        user_id: &str,
    ) -> AppResult<()> {
        let record = self.require_document(id).await?;
        self.authorize_owner(&record, requester, "add collaborator")?;

        if record.owner.as_deref() == Some(user_id) {
            return Err(AppError::Core(CoreError::Validation(
                "the owner cannot be added as a collaborator".into(),
            )));
        }
        self.identity.get_identity(user_id).await?;

        let added = CollaboratorRepo::add(&self.pool, id, user_id).await?;
        if added {
            tracing::info!(document_id = id, user_id, "collaborator added");
        }
        Ok(())
    }

    /// Revoke a user's collaborator access. Owner only.
    /// Returns whether a link was actually removed.
    pub async fn remove_collaborator(
        &self,
        requester: &Identity,
        id: DbId,
        user_id: &str,
    ) -> AppResult<bool> {
        let record = self.require_document(id).await?;
        self.authorize_owner(&record, requester, "remove collaborator")?;

        let removed = CollaboratorRepo::remove(&self.pool, id, user_id).await?;
        if removed {
            tracing::info!(document_id = id, user_id, "collaborator removed");
        }
        Ok(removed)
    }

    // -- helpers ------------------------------------------------------------

    async fn require_document(&self, id: DbId) -> AppResult<DocumentRecord> {
        DocumentRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    fn not_found(id: DbId) -> AppError {
        AppError::Core(CoreError::NotFound {
            entity: "Document",
            id: id.to_string(),
        })
    }

    fn authorize_owner(
        &self,
        record: &DocumentRecord,
        requester: &Identity,
        action: &str,
    ) -> AppResult<()> {
        if record.owner.as_deref() == Some(requester.uid.as_str()) {
            return Ok(());
        }
        tracing::info!(
            document_id = record.id,
            requester = %requester.uid,
            action,
            "refused: requester is not the owner"
        );
        Err(AppError::Core(CoreError::Forbidden(
            "only the document owner may do this".into(),
        )))
    }

    async fn authorize_owner_or_collaborator(
        &self,
        record: &DocumentRecord,
        requester: &Identity,
        action: &str,
    ) -> AppResult<()> {
        if record.owner.as_deref() == Some(requester.uid.as_str())
            || CollaboratorRepo::is_collaborator(&self.pool, record.id, &requester.uid).await?
        {
            return Ok(());
        }
        tracing::info!(
            document_id = record.id,
            requester = %requester.uid,
            action,
            "refused: requester is neither owner nor collaborator"
        );
        Err(AppError::Core(CoreError::Forbidden(
            "you do not have access to this document".into(),
        )))
    }

    fn decode_previews(records: Vec<DocumentPreviewRecord>) -> Vec<DocumentPreview> {
        records
            .into_iter()
            .filter_map(|record| match record.decode() {
                Ok(preview) => Some(preview),
                Err(err) => {
                    tracing::warn!(document_id = err.id, error = %err, "skipping corrupt document row in listing");
                    None
                }
            })
            .collect()
    }
}
