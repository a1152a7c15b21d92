//! Handlers for the `/document` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coauthor_core::error::CoreError;
use coauthor_core::types::DbId;
use coauthor_db::models::document::{Document, DocumentPreview, NodeSequence, UpdateDocument};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for `POST /document`.
#[derive(Debug, Serialize)]
pub struct CreateDocumentResponse {
    pub document_id: DbId,
}

/// Request body for `PATCH /document`. The target id travels in the body
/// because the route has no id segment.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    pub id: DbId,
    pub title: Option<String>,
    pub content: Option<NodeSequence>,
}

/// POST /document
///
/// The body is inspected as loose JSON so a missing or non-string `title`
/// is a 400, before any store write happens.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<CreateDocumentResponse>> {
    let title = body
        .get("title")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| AppError::BadRequest("title must be a string".into()))?;

    let document_id = state.documents.create(&user.identity, title).await?;
    Ok(Json(CreateDocumentResponse { document_id }))
}

/// GET /document/{id}
///
/// Reads are not ownership-scoped: any authenticated caller may fetch any
/// document by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = state.documents.get(id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Document",
            id: id.to_string(),
        })
    })?;
    Ok(Json(document))
}

/// GET /document/all
pub async fn list_owned(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<DocumentPreview>>> {
    let previews = state.documents.list_owned(&user.identity).await?;
    Ok(Json(previews))
}

/// GET /document/shared
pub async fn list_shared(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<DocumentPreview>>> {
    let previews = state.documents.list_shared(&user.identity).await?;
    Ok(Json(previews))
}

/// PATCH /document
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateDocumentRequest>,
) -> AppResult<Json<Document>> {
    let patch = UpdateDocument {
        title: input.title,
        content: input.content,
    };
    let document = state
        .documents
        .update(&user.identity, input.id, &patch)
        .await?;
    Ok(Json(document))
}

/// DELETE /document/{id}
///
/// Always answers 200: a refused delete and a miss are deliberately
/// indistinguishable to the caller (they differ only in server logs).
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.documents.delete(&user.identity, id).await?;
    Ok(StatusCode::OK)
}
