//! Authentication and permission-check collaborators
//!
//! The layer owns neither mechanism. An [`Authenticator`] turns a request into
//! a principal (or answers the request itself), and a [`PermissionChecker`]
//! decides whether that principal holds a permission string.

use std::future::Future;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

/// Authenticated identity attached to the request by the authentication stage
///
/// Stored in request extensions, so handlers can read it with
/// `Extension<P>`.
pub trait Principal: Clone + Send + Sync + 'static {}

impl<T> Principal for T where T: Clone + Send + Sync + 'static {}

/// Authentication stage of a protected chain
///
/// `Ok(principal)` continues the chain. `Err(response)` ends it and the
/// response is returned to the client untouched.
#[async_trait]
pub trait Authenticator<P: Principal>: Send + Sync + 'static {
    async fn authenticate(&self, req: &mut Request) -> Result<P, Response>;
}

/// Synchronous closures work as authenticators
///
/// ```ignore
/// access.configure_with(
///     |req: &mut Request| Ok::<_, Response>(User::guest()),
///     checker,
/// );
/// ```
#[async_trait]
impl<P, F> Authenticator<P> for F
where
    P: Principal,
    F: Fn(&mut Request) -> Result<P, Response> + Send + Sync + 'static,
{
    async fn authenticate(&self, req: &mut Request) -> Result<P, Response> {
        (self)(req)
    }
}

/// Permission stage of a protected chain
///
/// An `Err` is reported to the client as `500 Permission check error` with the
/// error's display text.
#[async_trait]
pub trait PermissionChecker<P: Principal>: Send + Sync + 'static {
    async fn check(&self, principal: &P, permission: &str) -> anyhow::Result<bool>;
}

/// Async closures taking an owned principal and permission work as checkers
#[async_trait]
impl<P, F, Fut> PermissionChecker<P> for F
where
    P: Principal,
    F: Fn(P, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
    async fn check(&self, principal: &P, permission: &str) -> anyhow::Result<bool> {
        (self)(principal.clone(), permission.to_owned()).await
    }
}
