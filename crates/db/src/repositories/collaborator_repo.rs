//! Repository for the `collaborator` membership relation.

use coauthor_core::types::DbId;
use sqlx::PgPool;

/// Provides membership operations for document collaborators.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Link a user to a document. Idempotent: re-adding an existing
    /// collaborator is a no-op. Returns `true` if a new link was created.
    pub async fn add(pool: &PgPool, document_id: DbId, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO collaborator (document_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(document_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unlink a user from a document. Returns `true` if a link was removed.
    pub async fn remove(
        pool: &PgPool,
        document_id: DbId,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM collaborator WHERE document_id = $1 AND user_id = $2")
                .bind(document_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the identity ids of a document's collaborators, in stable order.
    pub async fn list_user_ids(pool: &PgPool, document_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM collaborator WHERE document_id = $1 ORDER BY user_id",
        )
        .bind(document_id)
        .fetch_all(pool)
        .await
    }

    /// Whether `user_id` is linked to `document_id`.
    pub async fn is_collaborator(
        pool: &PgPool,
        document_id: DbId,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM collaborator WHERE document_id = $1 AND user_id = $2)",
        )
        .bind(document_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
