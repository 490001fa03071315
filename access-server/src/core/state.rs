//! 服务器状态
//!
//! 所有处理器共享的状态，克隆成本低 (内部全是 Arc)。

use std::sync::Arc;
use std::time::Instant;

use route_access::AccessControl;

use crate::auth::{BearerAuthenticator, CurrentUser, DirectoryChecker, UserDirectory};
use crate::core::{AppResult, Config};

/// 服务器状态
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 启动配置 |
/// | users | 用户目录 (令牌 → 用户) |
/// | access | 路由访问控制注册表 |
/// | started_at | 启动时间 (健康检查的 uptime) |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub users: Arc<UserDirectory>,
    pub access: AccessControl<CurrentUser>,
    pub started_at: Instant,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 加载用户目录 (USERS_FILE 或内置演示用户)
    /// 2. 配置访问控制：Bearer 认证 + 目录权限检查
    pub fn initialize(config: &Config) -> AppResult<Self> {
        let users = match &config.users_file {
            Some(path) => UserDirectory::load(path)?,
            None => {
                tracing::warn!("USERS_FILE not set, using built-in demo users");
                UserDirectory::demo()
            }
        };

        Ok(Self::with_directory(config.clone(), users))
    }

    /// 使用现有用户目录创建状态
    pub fn with_directory(config: Config, users: UserDirectory) -> Self {
        let users = Arc::new(users);
        let access = AccessControl::new();
        access.configure_with(
            BearerAuthenticator::new(users.clone()),
            DirectoryChecker::new(users.clone()),
        );

        Self {
            config: Arc::new(config),
            users,
            access,
            started_at: Instant::now(),
        }
    }

    /// 运行时长 (秒)
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
