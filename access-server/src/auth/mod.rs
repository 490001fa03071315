//! 认证授权模块
//!
//! 为 route-access 提供两个协作者和它们依赖的用户模型：
//! - [`CurrentUser`] - 当前用户上下文 (principal)
//! - [`UserDirectory`] - 令牌 → 用户目录
//! - [`BearerAuthenticator`] - 认证阶段
//! - [`DirectoryChecker`] - 权限检查阶段

pub mod authenticator;
pub mod checker;
pub mod directory;
pub mod permissions;
pub mod user;

pub use authenticator::BearerAuthenticator;
pub use checker::DirectoryChecker;
pub use directory::{UserDirectory, UserRecord};
pub use user::CurrentUser;
