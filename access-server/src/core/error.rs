//! 统一错误处理
//!
//! - [`AppError`] - 应用错误枚举
//! - [`ApiResponse`] - API 响应结构
//!
//! 权限闸门自己的 403/500 响应由 `route_access::Denial` 生成，
//! 这里只覆盖认证和业务错误。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::validation("username is required"))
//!
//! // 返回成功响应
//! Ok(Json(ApiResponse::ok(data)))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// API 统一响应结构
///
/// ```json
/// {
///   "success": true,
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 是否成功
    pub success: bool,
    /// 消息 (错误时)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 响应数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 创建错误响应
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// 应用错误枚举
///
/// | 分类 | HTTP 状态码 |
/// |------|------------|
/// | 未登录 / 无效令牌 | 401 |
/// | 无权授予 | 403 |
/// | 不存在 | 404 |
/// | 验证失败 | 400 |
/// | 用户目录 / 配置错误 | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized")]
    /// 未登录 (401)
    Unauthorized,

    #[error("Invalid token")]
    /// 无效令牌 (401)
    InvalidToken,

    #[error("{0}")]
    /// 无权执行此操作 (403)
    Forbidden(String),

    #[error("{0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("{0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Failed to read user directory {path}: {source}")]
    /// 用户目录读取失败
    UserDirectoryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse user directory {path}: {source}")]
    /// 用户目录解析失败
    UserDirectoryParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Route setup failed: {0}")]
    /// 路由构建失败
    RouteSetup(#[from] route_access::AccessError),

    #[error("Server error: {0}")]
    /// 服务器 I/O 错误
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UserDirectoryIo { .. }
            | Self::UserDirectoryParse { .. }
            | Self::RouteSetup(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;
