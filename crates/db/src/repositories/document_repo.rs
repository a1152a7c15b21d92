//! Repository for the `document` table.

use coauthor_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::{
    DocumentPreviewRecord, DocumentRecord, NewDocument, UpdateDocument,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, owner, created_at, modified, content";

/// Projection columns for list views.
const PREVIEW_COLUMNS: &str = "id, title, created_at, modified";

/// Provides CRUD operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document, returning the store-assigned id.
    ///
    /// `created_at` defaults to the insertion time; `modified` starts NULL.
    pub async fn insert(pool: &PgPool, input: &NewDocument) -> Result<DbId, sqlx::Error> {
        let content = serde_json::to_string(&input.content)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        sqlx::query_scalar(
            "INSERT INTO document (title, owner, content) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.owner_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Fetch a single document row by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DocumentRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM document WHERE id = $1");
        sqlx::query_as::<_, DocumentRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List preview rows for every document owned by `owner`, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: &str,
    ) -> Result<Vec<DocumentPreviewRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {PREVIEW_COLUMNS} FROM document WHERE owner = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, DocumentPreviewRecord>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// List preview rows for every document shared with `user_id` through the
    /// collaborator relation, newest first.
    pub async fn list_shared_with(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<DocumentPreviewRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {PREVIEW_COLUMNS} FROM document \
             INNER JOIN collaborator ON collaborator.document_id = document.id \
             WHERE collaborator.user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, DocumentPreviewRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a document. Only non-`None` fields in `input` are applied;
    /// `modified` is always bumped to the statement time.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDocument,
    ) -> Result<Option<DocumentRecord>, sqlx::Error> {
        let content = input
            .content
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "UPDATE document SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                modified = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentRecord>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document, scoped by ownership: the row is removed only when
    /// both the id and the owner match. Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, owner: &str, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM document WHERE owner = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
