//! Access Server - route-access 示例服务
//!
//! # 架构概述
//!
//! 一个最小的 axum 应用，演示如何用 [`route_access`] 保护路由：
//!
//! - **认证** (`auth`): Bearer 令牌 → [`CurrentUser`]，用户目录，权限目录
//! - **路由** (`routes`): 公共路由 + 受保护路由
//! - **核心** (`core`): 配置、状态、错误、服务器
//!
//! # 模块结构
//!
//! ```text
//! access-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 用户、用户目录、认证器、权限检查器
//! ├── middleware/    # 请求日志
//! ├── routes/        # HTTP 路由和处理器
//! └── utils/         # 日志初始化
//! ```

pub mod auth;
pub mod core;
pub mod middleware;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use auth::{BearerAuthenticator, CurrentUser, DirectoryChecker, UserDirectory};
pub use core::{ApiResponse, AppError, AppResult, Config, Server, ServerState};
pub use routes::{build_app, build_router};
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：加载 `.env`
pub fn setup_environment() {
    if let Err(e) = dotenv::dotenv() {
        // .env 是可选的
        tracing::debug!("No .env loaded: {e}");
    }
}

pub fn print_banner() {
    println!(
        r#"
    ___
   /   | _____________  __________
  / /| |/ ___/ ___/ _ \/ ___/ ___/
 / ___ / /__/ /__/  __(__  |__  )
/_/  |_\___/\___/\___/____/____/
    "#
    );
}
