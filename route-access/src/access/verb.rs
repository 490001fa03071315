//! HTTP verbs a protected route can be registered under

use std::fmt;

use axum::handler::Handler;
use axum::routing::{MethodFilter, MethodRouter, any, on};

/// Every method axum can route on
const EVERY_METHOD: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::OPTIONS)
    .or(MethodFilter::HEAD)
    .or(MethodFilter::TRACE)
    .or(MethodFilter::CONNECT);

/// Registration verb
///
/// `All` answers every method on the exact path. `Use` mounts the chain on a
/// path prefix: the path itself and everything beneath it, every method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    All,
    Use,
}

impl Verb {
    /// Every supported verb, in registration-API order
    pub const ALL: [Verb; 9] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Delete,
        Verb::Patch,
        Verb::Options,
        Verb::Head,
        Verb::All,
        Verb::Use,
    ];

    /// Name of the registration function for this verb
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Options => "options",
            Self::Head => "head",
            Self::All => "all",
            Self::Use => "use",
        }
    }

    /// Methods an exact-path route answers, `None` for the `Use` mount
    pub fn method_filter(&self) -> Option<MethodFilter> {
        match self {
            Self::Get => Some(MethodFilter::GET),
            Self::Post => Some(MethodFilter::POST),
            Self::Put => Some(MethodFilter::PUT),
            Self::Delete => Some(MethodFilter::DELETE),
            Self::Patch => Some(MethodFilter::PATCH),
            Self::Options => Some(MethodFilter::OPTIONS),
            Self::Head => Some(MethodFilter::HEAD),
            Self::All => Some(EVERY_METHOD),
            Self::Use => None,
        }
    }

    /// Whether the chain is mounted on a prefix instead of an exact path
    pub fn is_mount(&self) -> bool {
        matches!(self, Self::Use)
    }

    /// Method router answering this verb with `handler`
    ///
    /// `Use` yields a fallback-only router: the mount's gate is a prefix layer
    /// and explicit routes on the same path merge with it.
    pub(crate) fn method_router<H, T, S>(self, handler: H) -> MethodRouter<S>
    where
        H: Handler<T, S>,
        T: 'static,
        S: Clone + Send + Sync + 'static,
    {
        match self.method_filter() {
            Some(filter) => on(filter, handler),
            None => any(handler),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_ascii_uppercase())
    }
}
