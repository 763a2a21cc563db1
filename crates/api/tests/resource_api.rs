//! Integration tests for resource submission, visibility, search, ownership,
//! and ratings.

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

mod common;
use common::{
    body_json, build_test_app, create_test_user, delete_auth, get, get_auth, login_token,
    post_json_auth, put_json_auth, seed_hierarchy, seed_resource,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn page_zero_is_rejected_before_touching_the_db(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/resources?page=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_listing_hides_unapproved_resources(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let user = create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    seed_resource(&pool, ctx.subject_id, user, "Approved notes", true).await;
    seed_resource(&pool, ctx.subject_id, user, "Pending notes", false).await;
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/resources").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Approved notes");
    assert_eq!(body["pagination"]["total"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pending_detail_is_hidden_except_from_owner_and_moderator(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let owner = create_test_user(&pool, "Owner", "owner@example.com", "student").await;
    create_test_user(&pool, "Other", "other@example.com", "student").await;
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    let id = seed_resource(&pool, ctx.subject_id, owner, "Pending notes", false).await;
    let app = build_test_app(pool);
    let uri = format!("/api/v1/resources/{id}");

    // Anonymous and unrelated students see a 404, not a 403, so pending
    // submissions do not leak.
    let anonymous = get(app.clone(), &uri).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let other_token = login_token(app.clone(), "other@example.com").await;
    let other = get_auth(app.clone(), &uri, &other_token).await;
    assert_eq!(other.status(), StatusCode::NOT_FOUND);

    let owner_token = login_token(app.clone(), "owner@example.com").await;
    let owner_view = get_auth(app.clone(), &uri, &owner_token).await;
    assert_eq!(owner_view.status(), StatusCode::OK);

    let mod_token = login_token(app.clone(), "mod@example.com").await;
    let mod_view = get_auth(app, &uri, &mod_token).await;
    assert_eq!(mod_view.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_submissions_start_pending(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "sam@example.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/resources",
        json!({
            "resource_type": "notes",
            "title": "My summary notes",
            "url": "https://example.com/notes.pdf",
            "subject_id": ctx.subject_id
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["is_approved"], false);
    assert_eq!(body["data"]["quality_score"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moderator_submissions_are_auto_approved(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "mod@example.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/resources",
        json!({
            "resource_type": "lecture",
            "title": "Official lecture series",
            "url": "https://example.com/lectures",
            "subject_id": ctx.subject_id
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["is_approved"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quality_score_is_set_by_moderators_only(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    create_test_user(&pool, "Mod", "mod@example.com", "moderator").await;
    let app = build_test_app(pool);
    let student_token = login_token(app.clone(), "sam@example.com").await;
    let mod_token = login_token(app.clone(), "mod@example.com").await;

    // A student-supplied score is ignored; submissions start at 0.
    let submitted = post_json_auth(
        app.clone(),
        "/api/v1/resources",
        json!({
            "resource_type": "notes",
            "title": "Self-rated notes",
            "url": "https://example.com/notes.pdf",
            "subject_id": ctx.subject_id,
            "quality_score": 100
        }),
        &student_token,
    )
    .await;
    assert_eq!(submitted.status(), StatusCode::CREATED);
    let body = body_json(submitted).await;
    assert_eq!(body["data"]["quality_score"], 0);
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/resources/{id}");

    // The owner cannot raise it afterwards either.
    let owner_update = put_json_auth(
        app.clone(),
        &uri,
        json!({ "quality_score": 95 }),
        &student_token,
    )
    .await;
    assert_eq!(owner_update.status(), StatusCode::OK);
    assert_eq!(body_json(owner_update).await["data"]["quality_score"], 0);

    // Moderators keep theirs on submission.
    let curated = post_json_auth(
        app,
        "/api/v1/resources",
        json!({
            "resource_type": "lecture",
            "title": "Curated lecture series",
            "url": "https://example.com/lectures",
            "subject_id": ctx.subject_id,
            "quality_score": 80
        }),
        &mod_token,
    )
    .await;
    assert_eq!(curated.status(), StatusCode::CREATED);
    assert_eq!(body_json(curated).await["data"]["quality_score"], 80);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_title_words(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let user = create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    seed_resource(&pool, ctx.subject_id, user, "Sorting algorithms deep dive", true).await;
    seed_resource(&pool, ctx.subject_id, user, "Thermodynamics intro", true).await;
    let app = build_test_app(pool);

    let response = get(app.clone(), "/api/v1/resources?q=sorting%20algorithms").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Sorting algorithms deep dive");

    // A query with no extractable words is an input error, not an empty hit.
    let garbage = get(app, "/api/v1/resources?q=%21%21%21").await;
    assert_eq!(garbage.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_owner_or_admin_may_modify(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let owner = create_test_user(&pool, "Owner", "owner@example.com", "student").await;
    create_test_user(&pool, "Other", "other@example.com", "student").await;
    create_test_user(&pool, "Root", "root@example.com", "admin").await;
    let id = seed_resource(&pool, ctx.subject_id, owner, "Approved notes", true).await;
    let app = build_test_app(pool);
    let uri = format!("/api/v1/resources/{id}");

    let other_token = login_token(app.clone(), "other@example.com").await;
    let forbidden = put_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "Hijacked" }),
        &other_token,
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let owner_token = login_token(app.clone(), "owner@example.com").await;
    let renamed = put_json_auth(
        app.clone(),
        &uri,
        json!({ "title": "Renamed notes" }),
        &owner_token,
    )
    .await;
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(body_json(renamed).await["data"]["title"], "Renamed notes");

    // Admins may delete anyone's resource.
    let admin_token = login_token(app.clone(), "root@example.com").await;
    let deleted = delete_auth(app, &uri, &admin_token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_upsert_updates_the_aggregate(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let owner = create_test_user(&pool, "Owner", "owner@example.com", "student").await;
    create_test_user(&pool, "Rater", "rater@example.com", "student").await;
    let id = seed_resource(&pool, ctx.subject_id, owner, "Approved notes", true).await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "rater@example.com").await;
    let uri = format!("/api/v1/resources/{id}/rating");

    let first = put_json_auth(
        app.clone(),
        &uri,
        json!({ "rating": 5, "review": "excellent" }),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    // Re-rating replaces the previous value instead of adding a second row.
    let second = put_json_auth(app.clone(), &uri, json!({ "rating": 3 }), &token).await;
    assert_eq!(second.status(), StatusCode::OK);

    let detail = get(app.clone(), &format!("/api/v1/resources/{id}")).await;
    let body = body_json(detail).await;
    assert_eq!(body["data"]["average_rating"], 3.0);
    assert_eq!(body["data"]["total_ratings"], 1);

    let listing = get(app.clone(), &format!("/api/v1/resources/{id}/ratings")).await;
    let listing_body = body_json(listing).await;
    assert_eq!(listing_body["data"].as_array().unwrap().len(), 1);
    assert_eq!(listing_body["data"][0]["rating"], 3);

    let removed = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let after = get(app, &format!("/api/v1/resources/{id}")).await;
    let after_body = body_json(after).await;
    assert_eq!(after_body["data"]["total_ratings"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_a_nonexistent_rating_names_the_resource(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let owner = create_test_user(&pool, "Owner", "owner@example.com", "student").await;
    let id = seed_resource(&pool, ctx.subject_id, owner, "Approved notes", true).await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "owner@example.com").await;

    let response = delete_auth(app, &format!("/api/v1/resources/{id}/rating"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        format!("rating for resource with id {id} not found")
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_out_of_range_is_rejected(pool: PgPool) {
    let ctx = seed_hierarchy(&pool).await;
    let owner = create_test_user(&pool, "Owner", "owner@example.com", "student").await;
    let id = seed_resource(&pool, ctx.subject_id, owner, "Approved notes", true).await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "owner@example.com").await;

    let response = put_json_auth(
        app,
        &format!("/api/v1/resources/{id}/rating"),
        json!({ "rating": 6 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_subject_reference_is_a_client_error(pool: PgPool) {
    seed_hierarchy(&pool).await;
    create_test_user(&pool, "Sam", "sam@example.com", "student").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), "sam@example.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/resources",
        json!({
            "resource_type": "notes",
            "title": "Orphan notes",
            "url": "https://example.com/x",
            "subject_id": 999999
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");
}
