use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::{jwt::BearerToken, jwt::JwtKeys, repo_types::User, services::resolve_user};
use crate::{error::AppError, state::AppState};

/// Authenticated user; inactive accounts are rejected with `USER_INACTIVE`.
pub struct CurrentUser(pub User);

/// Authenticated user, active or not. Used by account-activation flows.
pub struct CurrentUserAllowInactive(pub User);

async fn extract_user(
    parts: &mut Parts,
    state: &AppState,
    require_active: bool,
) -> Result<User, AppError> {
    let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
    let keys = JwtKeys::from_ref(state);
    resolve_user(state.users.as_ref(), &keys, &token, require_active).await
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        extract_user(parts, state, true).await.map(CurrentUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUserAllowInactive {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        extract_user(parts, state, false)
            .await
            .map(CurrentUserAllowInactive)
    }
}
