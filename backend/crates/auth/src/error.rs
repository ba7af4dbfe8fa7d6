//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Every authentication failure renders the same opaque 401 body. The
//! stage that failed ([`AuthFailureKind`]) only reaches the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::Algorithm;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::repository::StoreError;
use crate::domain::value_object::username::UsernameRejection;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message of every authentication failure response
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// Stage at which a request failed authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AuthFailureKind {
    /// Authorization header or token not parseable
    #[display("format")]
    Format,
    /// Bad signature or non-HMAC algorithm
    #[display("signature")]
    Signature,
    /// Claims not shaped as expected
    #[display("claims")]
    Claims,
    /// User-record store failed
    #[display("store")]
    Store,
    /// No user record owns the token
    #[display("not_found")]
    NotFound,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    // ------------------------------------------------------------------------
    // Authentication failures (opaque 401)
    // ------------------------------------------------------------------------
    #[error("Authorization header must be '<scheme> <token>'")]
    InvalidHeader,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unsupported signing algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("Token signature rejected: {0}")]
    InvalidSignature(String),

    #[error("Token claims rejected: {0}")]
    InvalidClaims(String),

    #[error("User record lookup failed: {0}")]
    StoreLookup(StoreError),

    #[error("No user record for token")]
    RecordNotFound,

    // ------------------------------------------------------------------------
    // Everything else
    // ------------------------------------------------------------------------
    /// Handler ran without the middleware having attached an identity
    #[error("No authenticated identity on request")]
    IdentityMissing,

    #[error("{0}")]
    UsernameRejected(#[from] UsernameRejection),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Token issuance failed: {0}")]
    TokenIssue(String),

    /// Store failure outside the authentication step
    #[error("Store error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Failure stage, for authentication failures only
    pub fn failure_kind(&self) -> Option<AuthFailureKind> {
        match self {
            AuthError::InvalidHeader | AuthError::MalformedToken(_) => {
                Some(AuthFailureKind::Format)
            }
            AuthError::UnsupportedAlgorithm(_) | AuthError::InvalidSignature(_) => {
                Some(AuthFailureKind::Signature)
            }
            AuthError::InvalidClaims(_) => Some(AuthFailureKind::Claims),
            AuthError::StoreLookup(_) => Some(AuthFailureKind::Store),
            AuthError::RecordNotFound => Some(AuthFailureKind::NotFound),
            _ => None,
        }
    }

    #[inline]
    pub fn is_auth_failure(&self) -> bool {
        self.failure_kind().is_some()
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        if self.is_auth_failure() {
            return ErrorKind::Unauthorized;
        }
        match self {
            AuthError::UsernameRejected(_) => ErrorKind::UnprocessableEntity,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::Persistence(StoreError::Unavailable(_)) => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to the client-facing AppError
    ///
    /// Only policy rejections and conflicts describe themselves; server
    /// errors and auth failures use fixed messages.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::UsernameRejected(rejection) => {
                let err = AppError::unprocessable(rejection.to_string())
                    .with_code(rejection.code().as_str());
                match rejection.detail() {
                    Some(detail) => err.with_detail(detail),
                    None => err,
                }
            }
            AuthError::UsernameTaken => AppError::conflict(self.to_string()),
            _ if self.is_auth_failure() => AppError::unauthorized(AUTH_FAILED_MESSAGE),
            _ if self.kind() == ErrorKind::ServiceUnavailable => {
                AppError::service_unavailable("Service temporarily unavailable")
            }
            _ => AppError::internal("Internal server error"),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::StoreLookup(e) => {
                tracing::error!(stage = %AuthFailureKind::Store, error = %e, "Auth store lookup failed");
            }
            AuthError::UnsupportedAlgorithm(alg) => {
                tracing::warn!(stage = %AuthFailureKind::Signature, alg = ?alg, "Token with non-HMAC algorithm rejected");
            }
            _ if self.is_auth_failure() => {
                if let Some(stage) = self.failure_kind() {
                    tracing::debug!(stage = %stage, error = %self, "Authentication failed");
                }
            }
            AuthError::Persistence(e) => {
                tracing::error!(error = %e, "Auth store error");
            }
            AuthError::IdentityMissing | AuthError::TokenIssue(_) | AuthError::Internal(_) => {
                tracing::error!(error = %self, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
