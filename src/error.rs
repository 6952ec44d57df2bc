use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::repositories::StoreError;

/// Failure categories shared by the shorten and resolve pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed body or syntactically invalid URL.
    BadInput,
    /// Self-referential domain or alias collision.
    PolicyViolation,
    /// Client quota exhausted; recoverable after the reset window.
    QuotaExceeded,
    /// Unknown or expired alias.
    NotFound,
    /// Any store I/O failure. Never retried.
    StoreUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Cannot parse JSON")]
    MalformedBody,

    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Domain not allowed")]
    DomainNotAllowed,

    #[error("URL short already in use")]
    AliasInUse,

    #[error("Rate limit exceeded")]
    RateLimited { reset_minutes: u64 },

    #[error("Short URL does not exist")]
    NotFound,

    /// Store failure while resolving an alias.
    #[error("Cannot connect to DB")]
    LookupFailed(#[source] StoreError),

    /// Store failure anywhere in the shorten pipeline.
    #[error("Unable to connect to server")]
    StoreUnavailable(#[source] StoreError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedBody | Self::InvalidUrl => ErrorKind::BadInput,
            Self::DomainNotAllowed | Self::AliasInUse => ErrorKind::PolicyViolation,
            Self::RateLimited { .. } => ErrorKind::QuotaExceeded,
            Self::NotFound => ErrorKind::NotFound,
            Self::LookupFailed(_) | Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody => StatusCode::BAD_REQUEST,
            Self::InvalidUrl => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AliasInUse => StatusCode::FORBIDDEN,
            Self::DomainNotAllowed | Self::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::LookupFailed(_) | Self::StoreUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rate_limit_reset: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::LookupFailed(e) | Self::StoreUnavailable(e) = &self {
            tracing::error!(error = %e, "store failure: {}", self);
        }

        let rate_limit_reset = match &self {
            Self::RateLimited { reset_minutes } => Some(*reset_minutes),
            _ => None,
        };

        let body = ErrorBody {
            error: self.to_string(),
            rate_limit_reset,
        };

        (self.status(), Json(body)).into_response()
    }
}
