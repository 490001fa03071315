//! 权限闸门
//!
//! 每个受保护路由的前两个阶段：认证，然后异步权限检查。
//! 两个阶段使用请求开始时加载的同一个配置快照。

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::checker::Principal;
use super::registry::AccessControl;
use super::verb::Verb;
use crate::response::Denial;
use crate::security_log;

/// Authentication + permission stages of one protected route
pub struct PermissionGate<P: Principal> {
    access: AccessControl<P>,
    verb: Verb,
    path: Arc<str>,
    permission: Arc<str>,
}

impl<P: Principal> PermissionGate<P> {
    pub fn new(access: AccessControl<P>, verb: Verb, path: &str, permission: &str) -> Self {
        Self {
            access,
            verb,
            path: Arc::from(path),
            permission: Arc::from(permission),
        }
    }

    /// Run the gate for one request
    ///
    /// | 结果 | 响应 |
    /// |------|------|
    /// | 认证失败 | 认证阶段自己的响应 |
    /// | 检查返回 `false` | 403 Forbidden |
    /// | 检查出错 | 500 Permission check error |
    /// | 检查返回 `true` | 下游处理链 |
    pub async fn run(&self, mut req: Request, next: Next) -> Response {
        let config = match self.access.current() {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    path = %self.path,
                    "Protected route hit without access config: {e}"
                );
                return Denial::check_failed(e).into_response();
            }
        };

        let principal = match config.authenticate(&mut req).await {
            Ok(principal) => principal,
            Err(response) => return response,
        };
        req.extensions_mut().insert(principal.clone());

        match config.check(&principal, &self.permission).await {
            Ok(true) => next.run(req).await,
            Ok(false) => {
                security_log!(
                    "INFO",
                    "permission_denied",
                    verb = self.verb.as_str(),
                    path = &*self.path,
                    uri = req.uri().to_string(),
                    required_permission = &*self.permission
                );
                Denial::Forbidden.into_response()
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "permission_check_failed",
                    verb = self.verb.as_str(),
                    path = &*self.path,
                    uri = req.uri().to_string(),
                    required_permission = &*self.permission,
                    error = e.to_string()
                );
                Denial::check_failed(e).into_response()
            }
        }
    }
}

impl<P: Principal> Clone for PermissionGate<P> {
    fn clone(&self) -> Self {
        Self {
            access: self.access.clone(),
            verb: self.verb,
            path: Arc::clone(&self.path),
            permission: Arc::clone(&self.permission),
        }
    }
}
