//! Route definitions for the `/document` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{collaborators, documents};
use crate::state::AppState;

/// Routes mounted at `/document`. Every route requires a bearer credential.
///
/// ```text
/// GET    /all                              -> list_owned
/// GET    /shared                           -> list_shared
/// POST   /                                 -> create
/// PATCH  /                                 -> update
/// GET    /{id}                             -> get_by_id
/// DELETE /{id}                             -> delete
///
/// GET    /{id}/collaborator                -> collaborators::list
/// POST   /{id}/collaborator/{user_id}      -> collaborators::add
/// DELETE /{id}/collaborator/{user_id}      -> collaborators::remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(documents::list_owned))
        .route("/shared", get(documents::list_shared))
        .route("/", post(documents::create).patch(documents::update))
        .route(
            "/{id}",
            get(documents::get_by_id).delete(documents::delete),
        )
        .route("/{id}/collaborator", get(collaborators::list))
        .route(
            "/{id}/collaborator/{user_id}",
            post(collaborators::add).delete(collaborators::remove),
        )
}
