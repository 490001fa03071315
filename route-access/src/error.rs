//! Route setup errors
//!
//! These are raised while the route table is being built, never per request.
//! A request-time failure is a [`Denial`](crate::Denial) instead.

use thiserror::Error;

use crate::access::Verb;

/// Error raised by protected route registration
#[derive(Debug, Error)]
pub enum AccessError {
    /// Registration attempted before [`AccessControl::configure`](crate::AccessControl::configure)
    #[error("route-access: access control must be configured before defining protected routes")]
    NotConfigured,

    /// A protected route was declared without a permission
    #[error("route-access: protected route {verb} {path} requires a non-empty permission")]
    EmptyPermission { verb: Verb, path: String },
}

/// Result type for route registration
pub type AccessResult<T> = Result<T, AccessError>;
