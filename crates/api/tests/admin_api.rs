//! Integration tests for the admin back office: dashboard, moderation queue,
//! and user management.

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

mod common;
use common::{
    body_json, build_test_app, create_test_user, delete_auth, get, get_auth, login_token,
    post_json_auth, put_json_auth, seed_hierarchy, seed_resource,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_reports_entity_counts(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let admin = create_test_user(&pool, "Root", "root@example.com", "admin").await;
    seed_resource(&pool, ctx.subject_id, admin, "Approved notes", true).await;
    seed_resource(&pool, ctx.subject_id, admin, "Pending notes", false).await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "root@example.com").await;

    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["users"], 1);
    assert_eq!(body["data"]["branches"], 1);
    assert_eq!(body["data"]["subjects"], 1);
    assert_eq!(body["data"]["resources"], 2);
    assert_eq!(body["data"]["pending_resources"], 1);
    assert_eq!(body["data"]["roadmaps"], 0);
    assert_eq!(body["data"]["ratings"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_is_admin_only(pool: PgPool) {
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "mod@example.com").await;

    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moderation_queue_filters_by_approval(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let user = create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    seed_resource(&pool, ctx.subject_id, user, "Approved notes", true).await;
    seed_resource(&pool, ctx.subject_id, user, "Pending notes", false).await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "mod@example.com").await;

    let pending = get_auth(app.clone(), "/api/v1/admin/resources?approved=false", &token).await;
    assert_eq!(pending.status(), StatusCode::OK);
    let body = body_json(pending).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Pending notes");

    // Without the filter, moderators see everything.
    let all = get_auth(app, "/api/v1/admin/resources", &token).await;
    assert_eq!(
        body_json(all).await["data"].as_array().unwrap().len(),
        2
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approving_a_resource_publishes_it(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let user = create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    let id = seed_resource(&pool, ctx.subject_id, user, "Pending notes", false).await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "mod@example.com").await;

    let approved = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/resources/{id}/approve"),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(approved.status(), StatusCode::OK);
    assert_eq!(body_json(approved).await["data"]["is_approved"], true);

    let listing = get(app, "/api/v1/resources").await;
    let body = body_json(listing).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejecting_an_unknown_resource_is_404(pool: PgPool) {
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "mod@example.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/resources/999999/reject",
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moderation_requires_moderator_role(pool: PgPool) {
    create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "sam@example.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/resources/1/approve",
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_manages_users(pool: PgPool) {
    create_test_user(&pool, "Root", "root@example.com", "admin").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "root@example.com").await;

    // Admin-created accounts may carry any role.
    let created = post_json_auth(
        app.clone(),
        "/api/v1/admin/users",
        json!({
            "name": "Mina",
            "email": "mina@example.com",
            "password": "a-long-enough-password",
            "role": "moderator"
        }),
        &token,
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body = body_json(created).await;
    assert_eq!(created_body["data"]["role"], "moderator");
    let user_id = created_body["data"]["id"].as_i64().unwrap();

    let listing = get_auth(app.clone(), "/api/v1/admin/users", &token).await;
    assert_eq!(
        body_json(listing).await["data"].as_array().unwrap().len(),
        2
    );

    let updated = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{user_id}"),
        json!({ "role": "admin", "is_active": false }),
        &token,
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated_body = body_json(updated).await;
    assert_eq!(updated_body["data"]["role"], "admin");
    assert_eq!(updated_body["data"]["is_active"], false);

    let deleted = delete_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{user_id}"),
        &token,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get_auth(app, &format!("/api/v1/admin/users/{user_id}"), &token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let admin = create_test_user(&pool, "Root", "root@example.com", "admin").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "root@example.com").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{admin}"),
        json!({ "role": "superuser" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_delete_their_own_account(pool: PgPool) {
    let admin = create_test_user(&pool, "Root", "root@example.com", "admin").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "root@example.com").await;

    let response = delete_auth(app, &format!("/api/v1/admin/users/{admin}"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
