//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Secret, username policy, user records, repository traits
//! - `application/` - Token issuance/validation and use cases
//! - `infra/` - Postgres and in-memory stores, secret and banned-term files
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Security Model
//! - One HMAC secret per process, built at boot and passed explicitly
//! - Access tokens are HS256 JWTs carrying only `username`; they are
//!   deterministic and do not expire
//! - A token is live only while a user record stores it; deleting the
//!   record revokes it, rotating the secret revokes every token
//! - Only HMAC algorithms are accepted on inbound tokens
//! - Every authentication failure looks the same to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{TokenIssuer, TokenValidator};
pub use domain::value_object::{
    banned_terms::BannedTerms,
    secret::Secret,
    username::{UsernamePolicy, UsernameRejection},
    validation_pair::ValidationPair,
};
pub use error::{AuthError, AuthFailureKind, AuthResult};
pub use infra::{FileSecretStore, InMemoryUserRecordRepository, PgUserRecordRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::extractor::Authenticated;
    pub use crate::presentation::middleware::*;
}
