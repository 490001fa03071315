//! Gate responses
//!
//! Bodies written directly by the permission gate:
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | denied | 403 | `{"success":false,"message":"Forbidden"}` |
//! | check error | 500 | `{"success":false,"message":"Permission check error","error":"<message>"}` |

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message for a denied permission check
pub const FORBIDDEN_MESSAGE: &str = "Forbidden";

/// Message for a failed permission check
pub const CHECK_ERROR_MESSAGE: &str = "Permission check error";

/// JSON body written by the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialBody {
    /// Always `false`
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Message text of the checker's error (500 only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request-time outcome that stops a protected chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    /// The checker answered `false` (403)
    #[error("Forbidden")]
    Forbidden,

    /// The checker itself failed (500)
    #[error("Permission check error: {0}")]
    CheckFailed(String),
}

impl Denial {
    /// Build a [`Denial::CheckFailed`] from any checker error
    pub fn check_failed(err: impl std::fmt::Display) -> Self {
        Self::CheckFailed(err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::CheckFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> DenialBody {
        match self {
            Self::Forbidden => DenialBody {
                success: false,
                message: FORBIDDEN_MESSAGE.to_string(),
                error: None,
            },
            Self::CheckFailed(error) => DenialBody {
                success: false,
                message: CHECK_ERROR_MESSAGE.to_string(),
                error: Some(error.clone()),
            },
        }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
