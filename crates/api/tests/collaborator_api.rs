//! HTTP-level integration tests for the collaborator endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_document, delete_auth, get_auth, post_auth, ALICE, ALICE_TOKEN, BOB,
    BOB_TOKEN, CAROL, CAROL_TOKEN,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_can_add_and_list_collaborators(pool: PgPool) {
    let id = create_document(&pool, ALICE_TOKEN, "Shared notes").await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/document/{id}/collaborator/{BOB}"),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/document/{id}/collaborator"), ALICE_TOKEN).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    // Collaborators come back as resolved identities.
    assert_eq!(listed[0]["uid"], BOB);
    assert_eq!(listed[0]["email"], "bob@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn collaborators_can_list_but_strangers_cannot(pool: PgPool) {
    let id = create_document(&pool, ALICE_TOKEN, "Shared notes").await;
    let app = common::build_test_app(pool.clone());
    post_auth(
        app,
        &format!("/document/{id}/collaborator/{BOB}"),
        ALICE_TOKEN,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/document/{id}/collaborator"), BOB_TOKEN).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/document/{id}/collaborator"), CAROL_TOKEN).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_owner_may_add_collaborators(pool: PgPool) {
    let id = create_document(&pool, ALICE_TOKEN, "Mine").await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/document/{id}/collaborator/{CAROL}"),
        BOB_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The refused call must not have created a link.
    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, &format!("/document/{id}/collaborator"), ALICE_TOKEN).await,
    )
    .await;
    assert_eq!(json, serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_owner_may_remove_collaborators(pool: PgPool) {
    let id = create_document(&pool, ALICE_TOKEN, "Mine").await;
    let app = common::build_test_app(pool.clone());
    post_auth(
        app,
        &format!("/document/{id}/collaborator/{BOB}"),
        ALICE_TOKEN,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/document/{id}/collaborator/{BOB}"),
        BOB_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("/document/{id}/collaborator/{BOB}"),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn adding_an_unknown_identity_is_a_404(pool: PgPool) {
    let id = create_document(&pool, ALICE_TOKEN, "Mine").await;

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/document/{id}/collaborator/uid-nobody"),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn adding_the_owner_as_a_collaborator_is_a_400(pool: PgPool) {
    let id = create_document(&pool, ALICE_TOKEN, "Mine").await;

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/document/{id}/collaborator/{ALICE}"),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn collaborator_routes_on_a_missing_document_are_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/document/999999/collaborator", ALICE_TOKEN).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_auth(
        app,
        &format!("/document/999999/collaborator/{BOB}"),
        ALICE_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn stale_identities_are_dropped_from_the_listing(pool: PgPool) {
    // Link a user id the provider no longer knows, alongside a live one.
    let id = create_document(&pool, ALICE_TOKEN, "Mixed").await;
    let app = common::build_test_app(pool.clone());
    post_auth(
        app,
        &format!("/document/{id}/collaborator/{BOB}"),
        ALICE_TOKEN,
    )
    .await;
    sqlx::query("INSERT INTO collaborator (document_id, user_id) VALUES ($1, 'uid-departed')")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, &format!("/document/{id}/collaborator"), ALICE_TOKEN).await,
    )
    .await;
    let listed = json.as_array().unwrap();
    assert_eq!(listed.len(), 1, "the stale id must be dropped");
    assert_eq!(listed[0]["uid"], BOB);
}
