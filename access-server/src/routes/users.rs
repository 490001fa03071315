//! 用户 API
//!
//! | 路由 | 权限 |
//! |------|------|
//! | GET /api/users | users:read |
//! | POST /api/users | users:write |
//! | DELETE /api/users/{id} | users:write |
//! | GET /api/me | profile:read |
//!
//! 权限由 `route_access` 闸门在处理器之前检查，处理器只处理业务。

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use route_access::security_log;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::permissions::{is_admin_only, is_valid_permission};
use crate::auth::{CurrentUser, UserRecord};
use crate::core::{ApiResponse, AppError, AppResult, ServerState};

/// 创建用户请求
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// 删除用户的结果
#[derive(Debug, Serialize)]
pub struct RemovedUser {
    pub id: String,
    pub revoked_tokens: usize,
}

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> Json<ApiResponse<Vec<CurrentUser>>> {
    Json(ApiResponse::ok(state.users.users()))
}

/// GET /api/me
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<ApiResponse<CurrentUser>> {
    Json(ApiResponse::ok(user))
}

/// POST /api/users
///
/// 新用户角色固定为 `user`，返回新签发的令牌。
/// 管理员专属权限 (`all`) 只能由管理员授予。
pub async fn create(
    State(state): State<ServerState>,
    Extension(creator): Extension<CurrentUser>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserRecord>>)> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("username is required"));
    }
    if state.users.users().iter().any(|u| u.username == username) {
        return Err(AppError::validation(format!(
            "username '{username}' already exists"
        )));
    }
    if let Some(invalid) = req.permissions.iter().find(|p| !is_valid_permission(p)) {
        return Err(AppError::validation(format!("unknown permission '{invalid}'")));
    }
    if !creator.is_admin()
        && let Some(reserved) = req.permissions.iter().find(|p| is_admin_only(p))
    {
        security_log!(
            "WARN",
            "admin_permission_grant_denied",
            user = creator.username.clone(),
            permission = reserved.clone()
        );
        return Err(AppError::Forbidden(format!(
            "permission '{reserved}' can only be granted by an admin"
        )));
    }

    let record = UserRecord {
        token: Uuid::new_v4().simple().to_string(),
        user: CurrentUser {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role: "user".to_string(),
            permissions: req.permissions,
        },
    };
    state.users.insert(record.token.clone(), record.user.clone());

    tracing::info!(
        user_id = %record.user.id,
        username = %record.user.username,
        created_by = %creator.username,
        "User created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(record))))
}

/// DELETE /api/users/{id}
///
/// 吊销该用户的所有令牌。不能删除自己。
pub async fn remove(
    State(state): State<ServerState>,
    Extension(operator): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RemovedUser>>> {
    if operator.id == id {
        return Err(AppError::validation("cannot remove yourself"));
    }

    let revoked_tokens = state.users.remove_user(&id);
    if revoked_tokens == 0 {
        return Err(AppError::NotFound(format!("user '{id}' not found")));
    }

    tracing::info!(
        user_id = %id,
        revoked_tokens,
        removed_by = %operator.username,
        "User removed"
    );

    Ok(Json(ApiResponse::ok(RemovedUser { id, revoked_tokens })))
}
