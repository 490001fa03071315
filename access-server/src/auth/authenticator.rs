//! 认证阶段
//!
//! 从 `Authorization: Bearer <token>` 头提取令牌并在用户目录中查找。

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use route_access::{Authenticator, security_log};

use super::directory::UserDirectory;
use super::user::CurrentUser;
use crate::core::AppError;

/// Bearer 令牌认证器
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 非 Bearer 格式 / 未知令牌 | 401 Invalid token |
#[derive(Debug, Clone)]
pub struct BearerAuthenticator {
    directory: Arc<UserDirectory>,
}

impl BearerAuthenticator {
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self { directory }
    }

    /// Extract token from Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }

    fn resolve(&self, req: &Request) -> Result<CurrentUser, AppError> {
        let auth_header = req
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => Self::extract_from_header(header).ok_or(AppError::InvalidToken)?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
                return Err(AppError::Unauthorized);
            }
        };

        self.directory.find_by_token(token).ok_or_else(|| {
            security_log!("WARN", "auth_failed", uri = format!("{:?}", req.uri()));
            AppError::InvalidToken
        })
    }
}

#[async_trait]
impl Authenticator<CurrentUser> for BearerAuthenticator {
    async fn authenticate(&self, req: &mut Request) -> Result<CurrentUser, Response> {
        self.resolve(req).map_err(IntoResponse::into_response)
    }
}
