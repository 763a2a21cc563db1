//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` goes through the same [`build_app_router`] the binary
//! uses, so tests exercise the production middleware stack (CORS, request
//! ID, timeout, panic recovery) and not a stripped-down copy.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use campushub_api::auth::jwt::JwtConfig;
use campushub_api::auth::password::hash_password;
use campushub_api::config::ServerConfig;
use campushub_api::router::build_app_router;
use campushub_api::state::AppState;
use campushub_core::types::DbId;
use campushub_db::models::catalog::{CreateBranch, CreateProgram, CreateSemester, CreateYear};
use campushub_db::models::resource::CreateResource;
use campushub_db::models::subject::CreateSubject;
use campushub_db::models::user::CreateUser;
use campushub_db::repositories::{
    BranchRepo, ProgramRepo, ResourceRepo, SemesterRepo, SubjectRepo, UserRepo, YearRepo,
};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return its id. The password is
/// always `test_password_123!`.
pub async fn create_test_user(pool: &PgPool, name: &str, email: &str, role: &str) -> i64 {
    let hashed = hash_password("test_password_123!").expect("hashing should succeed");
    let input = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash: hashed,
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    user.id
}

/// Log a fixture user in via the API and return its access token.
pub async fn login_token(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": "test_password_123!" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Ids of a minimal seeded catalog: one branch, program, year, semester, and
/// subject.
pub struct HierarchyCtx {
    pub branch_id: DbId,
    pub program_id: DbId,
    pub semester_id: DbId,
    pub subject_id: DbId,
}

/// Seed branch -> program -> year -> semester -> subject directly through the
/// repositories so endpoint tests do not depend on the catalog API.
pub async fn seed_hierarchy(pool: &PgPool) -> HierarchyCtx {
    let branch = BranchRepo::create(
        pool,
        &CreateBranch {
            code: "CSE".into(),
            name: "Computer Science".into(),
        },
    )
    .await
    .unwrap();

    let program = ProgramRepo::create(
        pool,
        &CreateProgram {
            branch_id: branch.id,
            code: "BTECH".into(),
            name: "B.Tech".into(),
            duration_years: Some(4),
        },
    )
    .await
    .unwrap();

    let year = YearRepo::create(
        pool,
        &CreateYear {
            program_id: program.id,
            year_number: 2,
        },
    )
    .await
    .unwrap();

    let semester = SemesterRepo::create(
        pool,
        &CreateSemester {
            year_id: year.id,
            semester_number: 3,
        },
    )
    .await
    .unwrap();

    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            code: "CS301".into(),
            name: "Data Structures".into(),
            branch_id: branch.id,
            semester_id: semester.id,
            credits: Some(4),
            topics: vec!["arrays".into(), "trees".into()],
        },
    )
    .await
    .unwrap();

    HierarchyCtx {
        branch_id: branch.id,
        program_id: program.id,
        semester_id: semester.id,
        subject_id: subject.id,
    }
}

/// Insert a resource with the given approval state; other fields get
/// serviceable defaults.
pub async fn seed_resource(
    pool: &PgPool,
    subject_id: DbId,
    added_by: DbId,
    title: &str,
    approved: bool,
) -> DbId {
    ResourceRepo::create(
        pool,
        &CreateResource {
            resource_type: "lecture".into(),
            title: title.into(),
            url: "https://example.com/r".into(),
            description: Some(format!("{title} description")),
            provider: None,
            subject_id,
            topics: vec![],
            tags: vec![],
            added_by: Some(added_by),
            is_approved: approved,
            quality_score: 50,
        },
    )
    .await
    .unwrap()
    .id
}
