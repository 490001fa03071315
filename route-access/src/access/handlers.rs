//! Downstream handler chain
//!
//! A protected route runs its downstream stages after the permission gate, in
//! the order they were given. Pass-through stages are [`Middleware`]; the
//! chain may end in one axum handler. A chain with no handler answers
//! `404 Not Found` once every stage has passed.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::middleware::{Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use futures::future::BoxFuture;
use http::StatusCode;

use super::verb::Verb;

type BoxedMiddleware = Arc<dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync>;
type Endpoint<S> = Box<dyn FnOnce(Verb) -> MethodRouter<S> + Send>;

/// Pass-through stage: call `next.run(req)` to continue, or answer directly
#[derive(Clone)]
pub struct Middleware(BoxedMiddleware);

impl Middleware {
    /// Wrap an `axum::middleware::from_fn`-style function
    ///
    /// ```ignore
    /// let audit = Middleware::from_fn(|req: Request, next: Next| async move {
    ///     tracing::info!(path = %req.uri().path(), "audited");
    ///     next.run(req).await
    /// });
    /// ```
    pub fn from_fn<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self(Arc::new(move |req: Request, next: Next| -> BoxFuture<'static, Response> {
            let fut = f(req, next);
            Box::pin(async move { fut.await.into_response() })
        }))
    }

    pub fn call(&self, req: Request, next: Next) -> BoxFuture<'static, Response> {
        (self.0)(req, next)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Middleware")
    }
}

/// Ordered downstream stages of one protected route
pub struct Handlers<S> {
    middleware: Vec<Middleware>,
    endpoint: Option<Endpoint<S>>,
}

impl<S> Handlers<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
            endpoint: None,
        }
    }

    /// No downstream stages at all
    ///
    /// An exact-path route answers `404` once the gate passes. A `Use` mount
    /// falls through to the routes beneath its prefix.
    pub fn none() -> Self {
        Self::new()
    }

    /// Append a pass-through stage
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// End the chain with `handler`, replacing any earlier one
    pub fn handler<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.endpoint = Some(Box::new(move |verb: Verb| verb.method_router(handler)));
        self
    }

    /// Number of downstream stages
    pub fn len(&self) -> usize {
        self.middleware.len() + usize::from(self.endpoint.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pass-through stages plus the endpoint of a `Use` mount
    pub(crate) fn into_mount_parts(self) -> (Vec<Middleware>, Option<MethodRouter<S>>) {
        let endpoint = self.endpoint.map(|endpoint| endpoint(Verb::Use));
        (self.middleware, endpoint)
    }

    /// Build the method router for an exact-path `verb`, first stage outermost
    pub(crate) fn into_method_router(self, verb: Verb) -> MethodRouter<S> {
        let mut method_router = match self.endpoint {
            Some(endpoint) => endpoint(verb),
            None => verb.method_router(fall_through),
        };

        // route_layer 后加的在外层，所以逆序包裹
        for stage in self.middleware.into_iter().rev() {
            method_router = method_router.route_layer(from_fn(move |req: Request, next: Next| {
                stage.call(req, next)
            }));
        }

        method_router
    }
}

impl<S> Default for Handlers<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Handlers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("middleware", &self.middleware.len())
            .field("endpoint", &self.endpoint.is_some())
            .finish()
    }
}

async fn fall_through() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Marker for [`IntoHandlers`] implemented by a single axum handler
#[doc(hidden)]
pub struct ViaHandler;

/// Anything accepted as the `handlers` argument of a registration call
///
/// A single handler or middleware is the same as a one-element chain.
pub trait IntoHandlers<T, S>: Sized {
    fn into_handlers(self) -> Handlers<S>;
}

impl<S> IntoHandlers<(), S> for Handlers<S> {
    fn into_handlers(self) -> Handlers<S> {
        self
    }
}

impl<S> IntoHandlers<(), S> for Middleware
where
    S: Clone + Send + Sync + 'static,
{
    fn into_handlers(self) -> Handlers<S> {
        Handlers::new().middleware(self)
    }
}

impl<S> IntoHandlers<(), S> for Vec<Middleware>
where
    S: Clone + Send + Sync + 'static,
{
    fn into_handlers(self) -> Handlers<S> {
        self.into_iter()
            .fold(Handlers::new(), |handlers, stage| handlers.middleware(stage))
    }
}

impl<H, T, S> IntoHandlers<(ViaHandler, T), S> for H
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    fn into_handlers(self) -> Handlers<S> {
        Handlers::new().handler(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ok() -> &'static str {
        "ok"
    }

    fn pass() -> Middleware {
        Middleware::from_fn(|req: Request, next: Next| async move { next.run(req).await })
    }

    #[test]
    fn test_single_handler_is_one_stage() {
        let handlers: Handlers<()> = ok.into_handlers();
        assert_eq!(handlers.len(), 1);
    }

    #[test]
    fn test_single_middleware_matches_one_element_vec() {
        let single: Handlers<()> = pass().into_handlers();
        let list: Handlers<()> = vec![pass()].into_handlers();
        assert_eq!(single.len(), list.len());
        assert_eq!(format!("{single:?}"), format!("{list:?}"));
    }

    #[test]
    fn test_builder_counts_stages() {
        let handlers: Handlers<()> = Handlers::new()
            .middleware(pass())
            .middleware(pass())
            .handler(ok);
        assert_eq!(handlers.len(), 3);
        assert!(Handlers::<()>::none().is_empty());
    }

    #[test]
    fn test_handler_replaces_previous_endpoint() {
        let handlers: Handlers<()> = Handlers::new().handler(ok).handler(ok);
        assert_eq!(handlers.len(), 1);
    }
}
