//! 权限检查阶段
//!
//! 每次检查都重新从用户目录读取用户，令牌签发后被移除的用户
//! 得到 500 而不是沿用旧权限。

use std::sync::Arc;

use async_trait::async_trait;
use route_access::PermissionChecker;

use super::directory::UserDirectory;
use super::user::CurrentUser;

#[derive(Debug, Clone)]
pub struct DirectoryChecker {
    directory: Arc<UserDirectory>,
}

impl DirectoryChecker {
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl PermissionChecker<CurrentUser> for DirectoryChecker {
    async fn check(&self, principal: &CurrentUser, permission: &str) -> anyhow::Result<bool> {
        let user = self
            .directory
            .find_by_id(&principal.id)
            .ok_or_else(|| anyhow::anyhow!("User {} no longer exists", principal.id))?;
        Ok(user.has_permission(permission))
    }
}
