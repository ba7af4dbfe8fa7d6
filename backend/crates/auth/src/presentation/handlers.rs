//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::{
    RevokeUseCase, SignUpInput, SignUpUseCase, TokenIssuer, TokenValidator,
};
use crate::domain::repository::UserRecordRepository;
use crate::domain::value_object::{secret::Secret, username::UsernamePolicy};
use crate::error::AuthResult;
use crate::presentation::dto::{
    MeResponse, SignUpRequest, SignUpResponse, UsernameCheckRequest, UsernameCheckResponse,
};
use crate::presentation::extractor::Authenticated;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
    pub policy: Arc<UsernamePolicy>,
}

impl<R> AuthAppState<R>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    /// Issuer and validator both bound to `secret`
    pub fn new(repo: R, secret: &Secret, policy: UsernamePolicy) -> Self {
        Self {
            repo: Arc::new(repo),
            issuer: Arc::new(TokenIssuer::new(secret)),
            validator: Arc::new(TokenValidator::new(secret)),
            policy: Arc::new(policy),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.issuer.clone(),
        state.policy.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            username: req.username,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            username: output.username,
            token: output.token,
        }),
    ))
}

// ============================================================================
// Username Check
// ============================================================================

/// POST /api/auth/username/check
///
/// Runs the policy only; availability is checked at sign-up.
pub async fn check_username<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<UsernameCheckRequest>,
) -> Json<UsernameCheckResponse>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    Json(state.policy.validate(&req.username).into())
}

// ============================================================================
// Current User (behind require_auth)
// ============================================================================

/// GET /api/auth/me
pub async fn me(Authenticated(identity): Authenticated) -> Json<MeResponse> {
    Json(MeResponse {
        username: identity.username,
    })
}

/// DELETE /api/auth/me
pub async fn revoke<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(identity): Authenticated,
) -> AuthResult<StatusCode>
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    RevokeUseCase::new(state.repo.clone())
        .execute(&identity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
