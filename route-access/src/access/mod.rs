//! 访问控制模块
//!
//! - [`checker`] - 认证与权限检查的协作者 trait
//! - [`registry`] - [`AccessControl`] 注册表
//! - [`gate`] - 每个请求的权限闸门
//! - [`handlers`] - 下游处理链
//! - `mount` - `use_` 前缀挂载
//! - [`router`] - 按 HTTP 动词注册受保护路由
//! - [`verb`] - 支持的动词集合

pub mod checker;
pub mod gate;
pub mod handlers;
mod mount;
pub mod registry;
pub mod router;
pub mod verb;

pub use checker::{Authenticator, PermissionChecker, Principal};
pub use gate::PermissionGate;
pub use handlers::{Handlers, IntoHandlers, Middleware};
pub use registry::{AccessConfig, AccessControl, AccessOptions};
pub use router::{AccessRouterExt, ProtectedRouter};
pub use verb::Verb;
