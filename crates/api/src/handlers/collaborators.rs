//! Handlers for the `/document/{id}/collaborator` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coauthor_core::identity::Identity;
use coauthor_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /document/{id}/collaborator
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Identity>>> {
    let collaborators = state.documents.list_collaborators(&user.identity, id).await?;
    Ok(Json(collaborators))
}

/// POST /document/{id}/collaborator/{user_id}
pub async fn add(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, user_id)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    state
        .documents
        .add_collaborator(&user.identity, id, &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /document/{id}/collaborator/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, user_id)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    state
        .documents
        .remove_collaborator(&user.identity, id, &user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
