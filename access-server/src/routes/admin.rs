//! 管理区
//!
//! 挂载在 `/api/admin` 下，任意方法、任意子路径都需要 `all` 权限。
//! 闸门之后依次执行：审计 → 概览处理器。

use axum::{
    Extension, Json,
    extract::{OriginalUri, Request, State},
    middleware::Next,
};
use http::Method;
use route_access::{Handlers, Middleware, security_log};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::{ApiResponse, ServerState};

#[derive(Debug, Serialize)]
pub struct AdminOverview {
    pub method: String,
    pub path: String,
    pub admin: String,
    pub users: usize,
    pub uptime_seconds: u64,
}

/// 管理区处理链
pub fn handlers() -> Handlers<ServerState> {
    Handlers::new().middleware(audit()).handler(overview)
}

/// 记录每次进入管理区的访问
fn audit() -> Middleware {
    Middleware::from_fn(|req: Request, next: Next| async move {
        let user = req
            .extensions()
            .get::<CurrentUser>()
            .map(|u| u.username.clone())
            .unwrap_or_default();
        security_log!(
            "INFO",
            "admin_access",
            user = user,
            method = req.method().to_string(),
            path = req.uri().path().to_string()
        );
        next.run(req).await
    })
}

async fn overview(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Json<ApiResponse<AdminOverview>> {
    Json(ApiResponse::ok(AdminOverview {
        method: method.to_string(),
        path: uri.path().to_string(),
        admin: user.username,
        users: state.users.users().len(),
        uptime_seconds: state.uptime_secs(),
    }))
}
