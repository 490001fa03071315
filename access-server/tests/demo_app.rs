//! End-to-end tests for the demo application, driven in-process.

use std::io::Write;

use access_server::{Config, ServerState, UserDirectory, build_app};
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

fn demo_state() -> ServerState {
    ServerState::with_directory(Config::with_overrides(0, None), UserDirectory::demo())
}

fn app() -> Router {
    build_app(&demo_state()).unwrap()
}

async fn call(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let (status, body) = call(app(), Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Public route, no permission required");

    let (status, body) = call(app(), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (status, body) = call(app(), Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "message": "Unauthorized" }));
}

#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let (status, body) = call(app(), Method::GET, "/api/users", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "message": "Invalid token" }));
}

#[tokio::test]
async fn reader_can_list_users() {
    let (status, body) = call(app(), Method::GET, "/api/users", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn reader_cannot_create_users() {
    let (status, body) = call(
        app(),
        Method::POST,
        "/api/users",
        Some("user-token"),
        Some(json!({ "username": "eve" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "success": false, "message": "Forbidden" }));
}

#[tokio::test]
async fn wildcard_permission_can_create_users() {
    let state = demo_state();
    let app = build_app(&state).unwrap();

    let (status, body) = call(
        app.clone(),
        Method::POST,
        "/api/users",
        Some("manager-token"),
        Some(json!({ "username": "carol", "permissions": ["profile:read"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "carol");
    assert_eq!(body["data"]["role"], "user");

    // 新令牌立即可用
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = call(app, Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "carol");
    assert_eq!(state.users.users().len(), 5);
}

#[tokio::test]
async fn create_user_validates_body() {
    let (status, body) = call(
        app(),
        Method::POST,
        "/api/users",
        Some("admin-token"),
        Some(json!({ "username": "dave", "permissions": ["users:fly"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unknown permission 'users:fly'");

    let (status, _) = call(
        app(),
        Method::POST,
        "/api/users",
        Some("admin-token"),
        Some(json!({ "username": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_admins_grant_admin_permissions() {
    let state = demo_state();
    let app = build_app(&state).unwrap();

    let (status, body) = call(
        app.clone(),
        Method::POST,
        "/api/users",
        Some("manager-token"),
        Some(json!({ "username": "mallory", "permissions": ["all"] })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "permission 'all' can only be granted by an admin"
    );
    assert_eq!(state.users.users().len(), 4);

    let (status, body) = call(
        app.clone(),
        Method::POST,
        "/api/users",
        Some("admin-token"),
        Some(json!({ "username": "root2", "permissions": ["all"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, _) = call(app, Method::GET, "/api/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn removing_a_user_revokes_their_token() {
    let state = demo_state();
    let app = build_app(&state).unwrap();

    let (status, body) = call(
        app.clone(),
        Method::DELETE,
        "/api/users/4",
        Some("manager-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "id": "4", "revoked_tokens": 1 }));

    let (status, _) = call(app.clone(), Method::GET, "/api/me", Some("guest-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        app.clone(),
        Method::DELETE,
        "/api/users/4",
        Some("manager-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(app, Method::DELETE, "/api/users/2", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_returns_the_principal() {
    let (status, body) = call(app(), Method::GET, "/api/me", Some("guest-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "4");
    assert_eq!(body["data"]["username"], "guest");
}

#[tokio::test]
async fn admin_area_covers_every_method_and_nested_path() {
    let (status, body) = call(app(), Method::GET, "/api/admin", Some("admin-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["path"], "/api/admin");

    let (status, body) = call(
        app(),
        Method::DELETE,
        "/api/admin/users/3",
        Some("admin-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["method"], "DELETE");
    assert_eq!(body["data"]["path"], "/api/admin/users/3");
}

#[tokio::test]
async fn admin_area_denies_wildcard_holders() {
    let (status, body) = call(
        app(),
        Method::GET,
        "/api/admin/stats",
        Some("manager-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "success": false, "message": "Forbidden" }));
}

#[tokio::test]
async fn users_file_replaces_demo_users() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"token":"file-token","id":"9","username":"zoe","role":"user","permissions":["profile:read"]}}]"#
    )
    .unwrap();

    let config = Config::with_overrides(0, Some(file.path().display().to_string()));
    let state = ServerState::initialize(&config).unwrap();
    let app = build_app(&state).unwrap();

    let (status, body) = call(app.clone(), Method::GET, "/api/me", Some("file-token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "zoe");

    let (status, _) = call(app, Method::GET, "/api/me", Some("user-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
