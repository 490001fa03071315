//! 前缀挂载 (`use_`)
//!
//! 挂载不是一条路由，而是一层前缀过滤的中间件：路径落在前缀下的请求
//! 先经过认证和权限闸门，再经过挂载的处理阶段，然后继续交给前缀下的
//! 路由 (包括挂载之外注册的普通路由)。前缀外的请求直接放行。

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use futures::future::BoxFuture;

use super::checker::Principal;
use super::gate::PermissionGate;
use super::handlers::Middleware;

/// Gate and pass-through stages guarding one path prefix
pub(crate) struct Mount<P: Principal> {
    prefix: Arc<str>,
    gate: PermissionGate<P>,
    stages: Vec<Middleware>,
}

impl<P: Principal> Mount<P> {
    /// `prefix` without its trailing `/`; empty means the whole router
    pub(crate) fn new(prefix: &str, gate: PermissionGate<P>, stages: Vec<Middleware>) -> Self {
        Self {
            prefix: Arc::from(prefix),
            gate,
            stages,
        }
    }

    /// Wrap every route and the fallback of `router`
    ///
    /// Only requests whose path is the prefix or lies beneath it are affected.
    pub(crate) fn apply<S>(self, mut router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // layer 后加的在外层：逆序包裹处理阶段，闸门最后包裹
        for stage in self.stages.into_iter().rev() {
            let prefix = self.prefix.clone();
            router = router.layer(from_fn(
                move |req: Request, next: Next| -> BoxFuture<'static, Response> {
                    if covers(&prefix, req.uri().path()) {
                        stage.call(req, next)
                    } else {
                        Box::pin(next.run(req))
                    }
                },
            ));
        }

        let prefix = self.prefix;
        let gate = self.gate;
        router.layer(from_fn(
            move |req: Request, next: Next| -> BoxFuture<'static, Response> {
                if covers(&prefix, req.uri().path()) {
                    let gate = gate.clone();
                    Box::pin(async move { gate.run(req, next).await })
                } else {
                    Box::pin(next.run(req))
                }
            },
        ))
    }
}

/// Whether `path` is `prefix` itself or a path segment beneath it
fn covers(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_prefix_and_subtree() {
        assert!(covers("/admin", "/admin"));
        assert!(covers("/admin", "/admin/"));
        assert!(covers("/admin", "/admin/users/3"));
        assert!(!covers("/admin", "/administrator"));
        assert!(!covers("/admin", "/"));
        assert!(!covers("/admin", "/api/admin"));
    }

    #[test]
    fn test_empty_prefix_covers_everything() {
        assert!(covers("", "/"));
        assert!(covers("", "/anything/at/all"));
    }
}
