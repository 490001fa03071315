//! Route Access - permission-gated route registration for axum
//!
//! # Overview
//!
//! Every protected route runs a fixed chain:
//!
//! ```text
//! authenticate ──► permission gate ──► downstream handlers
//!      │                 │
//!      └─ auth response  ├─ 403 {"success":false,"message":"Forbidden"}
//!                        └─ 500 {"success":false,"message":"Permission check error","error":"..."}
//! ```
//!
//! - [`AccessControl`]: registry holding one [`Authenticator`] and one [`PermissionChecker`]
//! - [`ProtectedRouter`]: per-verb registration (`get`, `post`, ..., `all`, `use_`)
//! - [`Denial`]: the two runtime outcomes the gate answers itself
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, extract::Request, response::Response};
//! use route_access::{AccessControl, AccessRouterExt};
//!
//! let access = AccessControl::<User>::new();
//! access.configure_with(
//!     |req: &mut Request| lookup_user(req),
//!     |user: User, permission: String| async move { anyhow::Ok(user.can(&permission)) },
//! );
//!
//! let app: Router = Router::new()
//!     .access(&access)
//!     .get("/users", "users:read", list_users)?
//!     .post("/users", "users:write", create_user)?
//!     .into_router();
//! ```

pub mod access;
pub mod error;
pub mod response;

pub use access::{
    AccessConfig, AccessControl, AccessOptions, AccessRouterExt, Authenticator, Handlers,
    IntoHandlers, Middleware, PermissionChecker, PermissionGate, Principal, ProtectedRouter, Verb,
};
pub use error::{AccessError, AccessResult};
pub use response::{Denial, DenialBody};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
