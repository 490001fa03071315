//! Route Adapter
//!
//! Registers protected routes on an `axum::Router`. Each exact-path
//! registration builds the chain `[authenticate, permission gate, handlers...]`
//! and hands it to the router straight away. `use_` mounts are kept until
//! [`ProtectedRouter::into_router`], which wraps the finished router so the
//! mount guards every route beneath its prefix.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/", get(index))               // public
//!     .access(&access)
//!     .get("/users", "users:read", list)?
//!     .use_("/admin", "admin:access", admin_chain)?
//!     .into_router();
//! ```

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn};

use super::checker::Principal;
use super::gate::PermissionGate;
use super::handlers::{Handlers, IntoHandlers};
use super::mount::Mount;
use super::registry::AccessControl;
use super::verb::Verb;
use crate::error::{AccessError, AccessResult};

/// An `axum::Router` plus the registry its protected routes read
pub struct ProtectedRouter<S, P: Principal> {
    router: Router<S>,
    access: AccessControl<P>,
    mounts: Vec<Mount<P>>,
}

impl<S, P> ProtectedRouter<S, P>
where
    S: Clone + Send + Sync + 'static,
    P: Principal,
{
    pub fn new(router: Router<S>, access: AccessControl<P>) -> Self {
        Self {
            router,
            access,
            mounts: Vec::new(),
        }
    }

    /// Register a protected route under `verb`
    ///
    /// # 错误
    ///
    /// - 注册表未配置: [`AccessError::NotConfigured`]
    /// - 权限为空: [`AccessError::EmptyPermission`]
    pub fn route<T>(
        self,
        verb: Verb,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        if !self.access.is_configured() {
            return Err(AccessError::NotConfigured);
        }
        if permission.is_empty() {
            return Err(AccessError::EmptyPermission {
                verb,
                path: path.to_string(),
            });
        }

        let handlers = handlers.into_handlers();
        tracing::debug!(
            verb = %verb,
            path = %path,
            permission = %permission,
            stages = handlers.len(),
            "Registering protected route"
        );

        let gate = PermissionGate::new(self.access.clone(), verb, path, permission);
        if verb.is_mount() {
            return Ok(self.mount(path, gate, handlers));
        }

        let method_router = handlers
            .into_method_router(verb)
            .route_layer(from_fn(move |req: Request, next: Next| {
                let gate = gate.clone();
                async move { gate.run(req, next).await }
            }));

        Ok(Self {
            router: self.router.route(path, method_router),
            ..self
        })
    }

    /// Record a prefix mount; a handler at its end answers whatever no other
    /// route beneath the prefix answers
    fn mount(mut self, path: &str, gate: PermissionGate<P>, handlers: Handlers<S>) -> Self {
        let prefix = path.trim_end_matches('/');
        let (stages, endpoint) = handlers.into_mount_parts();

        if let Some(endpoint) = endpoint {
            let root = if prefix.is_empty() { "/" } else { prefix };
            self.router = self
                .router
                .route(root, endpoint.clone())
                .route(&format!("{prefix}/{{*rest}}"), endpoint);
        }

        self.mounts.push(Mount::new(prefix, gate, stages));
        self
    }

    pub fn get<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Get, path, permission, handlers)
    }

    pub fn post<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Post, path, permission, handlers)
    }

    pub fn put<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Put, path, permission, handlers)
    }

    pub fn delete<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Delete, path, permission, handlers)
    }

    pub fn patch<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Patch, path, permission, handlers)
    }

    pub fn options<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Options, path, permission, handlers)
    }

    pub fn head<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Head, path, permission, handlers)
    }

    /// Every method on exactly `path`
    pub fn all<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::All, path, permission, handlers)
    }

    /// Guard `path` and everything beneath it, every method
    ///
    /// Requests under the prefix pass authentication, the permission gate and
    /// the given middleware, then continue to whichever route matches,
    /// including routes added outside this registration. This holds for
    /// routes registered before or after the mount, up to `into_router`.
    pub fn use_<T>(
        self,
        path: &str,
        permission: &str,
        handlers: impl IntoHandlers<T, S>,
    ) -> AccessResult<Self> {
        self.route(Verb::Use, path, permission, handlers)
    }

    /// Apply `f` to the inner router, e.g. to add public routes
    pub fn map_router(self, f: impl FnOnce(Router<S>) -> Router<S>) -> Self {
        Self {
            router: f(self.router),
            ..self
        }
    }

    pub fn access_control(&self) -> &AccessControl<P> {
        &self.access
    }

    /// Finish registration; mounts apply in registration order, first outermost
    pub fn into_router(self) -> Router<S> {
        self.mounts
            .into_iter()
            .rev()
            .fold(self.router, |router, mount| mount.apply(router))
    }
}

/// Extension trait opening protected registration on an `axum::Router`
pub trait AccessRouterExt<S> {
    fn access<P: Principal>(self, access: &AccessControl<P>) -> ProtectedRouter<S, P>;
}

impl<S> AccessRouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn access<P: Principal>(self, access: &AccessControl<P>) -> ProtectedRouter<S, P> {
        ProtectedRouter::new(self, access.clone())
    }
}
