//! Access Registry
//!
//! Holds the configured [`Authenticator`] and [`PermissionChecker`] as a single
//! snapshot. The registry is an explicit handle: whoever builds the router
//! creates it, configures it and passes it to [`ProtectedRouter`].
//!
//! # Reconfiguration
//!
//! `configure` swaps the whole snapshot under a write lock. Protected routes
//! read the snapshot at the start of every request, so routes registered
//! before a reconfiguration switch to the new collaborators too. A request
//! that already started keeps the snapshot it loaded.
//!
//! [`ProtectedRouter`]: crate::ProtectedRouter

use std::fmt;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;
use parking_lot::RwLock;

use super::checker::{Authenticator, PermissionChecker, Principal};
use crate::error::{AccessError, AccessResult};

/// Configuration object accepted by [`AccessControl::configure`]
pub struct AccessOptions<P: Principal> {
    /// Authentication stage run first on every protected route
    pub auth_middleware: Arc<dyn Authenticator<P>>,
    /// Permission check run after authentication
    pub check_permission: Arc<dyn PermissionChecker<P>>,
}

impl<P: Principal> AccessOptions<P> {
    pub fn new(
        auth_middleware: impl Authenticator<P>,
        check_permission: impl PermissionChecker<P>,
    ) -> Self {
        Self {
            auth_middleware: Arc::new(auth_middleware),
            check_permission: Arc::new(check_permission),
        }
    }
}

/// One configured pair of collaborators
pub struct AccessConfig<P: Principal> {
    authenticator: Arc<dyn Authenticator<P>>,
    checker: Arc<dyn PermissionChecker<P>>,
}

impl<P: Principal> AccessConfig<P> {
    pub async fn authenticate(&self, req: &mut Request) -> Result<P, Response> {
        self.authenticator.authenticate(req).await
    }

    pub async fn check(&self, principal: &P, permission: &str) -> anyhow::Result<bool> {
        self.checker.check(principal, permission).await
    }
}

impl<P: Principal> From<AccessOptions<P>> for AccessConfig<P> {
    fn from(options: AccessOptions<P>) -> Self {
        Self {
            authenticator: options.auth_middleware,
            checker: options.check_permission,
        }
    }
}

/// Access Registry handle
///
/// Cloning is cheap and every clone shares the same snapshot.
pub struct AccessControl<P: Principal> {
    current: Arc<RwLock<Option<Arc<AccessConfig<P>>>>>,
}

impl<P: Principal> AccessControl<P> {
    /// Create an unconfigured registry
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a registry configured with `options`
    pub fn with_options(options: AccessOptions<P>) -> Self {
        let access = Self::new();
        access.configure(options);
        access
    }

    /// Store both collaborators, replacing any previous pair
    pub fn configure(&self, options: AccessOptions<P>) {
        let config = Arc::new(AccessConfig::from(options));
        let previous = self.current.write().replace(config);
        if previous.is_some() {
            tracing::info!("Access control reconfigured, previous collaborators replaced");
        } else {
            tracing::debug!("Access control configured");
        }
    }

    /// Shorthand for `configure(AccessOptions::new(..))`
    pub fn configure_with(
        &self,
        auth_middleware: impl Authenticator<P>,
        check_permission: impl PermissionChecker<P>,
    ) {
        self.configure(AccessOptions::new(auth_middleware, check_permission));
    }

    pub fn is_configured(&self) -> bool {
        self.current.read().is_some()
    }

    /// Current snapshot
    ///
    /// # 错误
    ///
    /// 未配置时返回 [`AccessError::NotConfigured`]
    pub fn current(&self) -> AccessResult<Arc<AccessConfig<P>>> {
        self.current
            .read()
            .as_ref()
            .cloned()
            .ok_or(AccessError::NotConfigured)
    }
}

impl<P: Principal> Clone for AccessControl<P> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<P: Principal> Default for AccessControl<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Principal> fmt::Debug for AccessControl<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControl")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[derive(Debug, Clone)]
    struct User(&'static str);

    fn as_user(name: &'static str) -> impl Authenticator<User> {
        move |_req: &mut Request| -> Result<User, Response> { Ok(User(name)) }
    }

    fn allow_all() -> impl PermissionChecker<User> {
        |_user: User, _permission: String| async move { anyhow::Ok(true) }
    }

    #[test]
    fn test_new_registry_is_unconfigured() {
        let access = AccessControl::<User>::new();
        assert!(!access.is_configured());
        assert!(matches!(access.current(), Err(AccessError::NotConfigured)));
    }

    #[test]
    fn test_configure_sets_both_collaborators() {
        let access = AccessControl::new();
        access.configure_with(as_user("alice"), allow_all());
        assert!(access.is_configured());
        assert!(access.current().is_ok());
    }

    #[test]
    fn test_clones_share_snapshot() {
        let access = AccessControl::<User>::new();
        let clone = access.clone();
        access.configure_with(as_user("alice"), allow_all());
        assert!(clone.is_configured());
        assert_eq!(format!("{clone:?}"), "AccessControl { configured: true }");
    }

    #[tokio::test]
    async fn test_reconfigure_replaces_snapshot() {
        let access = AccessControl::with_options(AccessOptions::new(as_user("alice"), allow_all()));
        let first = access.current().unwrap();

        access.configure_with(as_user("bob"), |_user: User, _permission: String| async move {
            anyhow::Ok(false)
        });
        let second = access.current().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        let mut req = Request::builder().body(Body::empty()).unwrap();
        let user = second.authenticate(&mut req).await.unwrap();
        assert_eq!(user.0, "bob");
        assert!(!second.check(&user, "anything").await.unwrap());

        // 已加载的快照保持不变
        let user = first.authenticate(&mut req).await.unwrap();
        assert_eq!(user.0, "alice");
    }
}
