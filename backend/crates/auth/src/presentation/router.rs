//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRecordRepository;
use crate::domain::value_object::{secret::Secret, username::UsernamePolicy};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router for any repository implementation
///
/// `/me` sits behind [`require_auth`]; `/signup` and `/username/check` are open.
pub fn auth_router<R>(repo: R, secret: &Secret, policy: UsernamePolicy) -> Router
where
    R: UserRecordRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, secret, policy);
    let auth_state = AuthMiddlewareState::new(state.repo.clone(), state.validator.clone());

    let protected = Router::new()
        .route("/me", get(handlers::me).delete(handlers::revoke::<R>))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth::<R>));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/username/check", post(handlers::check_username::<R>))
        .merge(protected)
        .with_state(state)
}
