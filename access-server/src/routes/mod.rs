use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use route_access::{AccessResult, AccessRouterExt};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::permissions::{ADMIN_AREA, PROFILE_READ, USERS_READ, USERS_WRITE};
use crate::core::ServerState;
use crate::middleware;

pub mod admin;
pub mod health;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
///
/// 受保护路由在 `state.access` 未配置时注册失败。
pub fn build_router(state: &ServerState) -> AccessResult<Router<ServerState>> {
    let protected = Router::new()
        .access(&state.access)
        // Users API - users:read / users:write
        .get("/api/users", USERS_READ, users::list)?
        .post("/api/users", USERS_WRITE, users::create)?
        .delete("/api/users/{id}", USERS_WRITE, users::remove)?
        // Profile API - profile:read
        .get("/api/me", PROFILE_READ, users::me)?
        // Admin area - every method, every nested path
        .use_("/api/admin", ADMIN_AREA, admin::handlers())?
        .into_router();

    Ok(Router::new()
        .merge(protected)
        // Health API - public route
        .merge(health::router()))
}

/// Build a fully configured application with all middleware and state
///
/// This is used by both the HTTP server and in-process tests
pub fn build_app(state: &ServerState) -> AccessResult<Router> {
    let app = build_router(state)?
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - Generate unique ID for each request (outermost)
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state.clone());

    Ok(app)
}
