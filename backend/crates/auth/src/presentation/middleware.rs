//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.
//!
//! On success the stored `{username, token}` pair is placed in the request
//! extensions, where [`Authenticated`](super::extractor::Authenticated)
//! takes it out. On failure the request stops with the opaque 401 and,
//! when the token did not verify, the store is never queried.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::{AuthenticateUseCase, TokenValidator};
use crate::domain::repository::UserRecordRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    pub authenticate: AuthenticateUseCase<R>,
}

impl<R> AuthMiddlewareState<R>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, validator: Arc<TokenValidator>) -> Self {
        Self {
            authenticate: AuthenticateUseCase::new(repo, validator),
        }
    }
}

/// Middleware that requires a live access token
pub async fn require_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    let identity = state.authenticate.execute(req.headers()).await?;

    tracing::debug!(
        username = %identity.username,
        token = %identity.token_fingerprint(),
        "Request authenticated"
    );

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
