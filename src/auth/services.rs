use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::{
    claims::TokenKind,
    dto::RegisterRequest,
    jwt::JwtKeys,
    password::{hash_password, verify_against_dummy, verify_password},
    repo::UserStore,
    repo_types::{NewUser, User},
};
use crate::error::AppError;

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

pub async fn find_by_email(users: &dyn UserStore, email: &str) -> Result<Option<User>, AppError> {
    users.find_by_email(&normalize_email(email)).await
}

/// Hashes the password and inserts the user. Email uniqueness is enforced by the
/// insert itself, so two concurrent registrations cannot both succeed.
#[instrument(skip(users, req), fields(email = %req.email))]
pub async fn register(users: &dyn UserStore, req: RegisterRequest) -> Result<User, AppError> {
    let email = normalize_email(&req.email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if req.password.chars().count() < 8 {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    let password_hash = hash_password(&req.password)?;
    let full_name = req
        .full_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let user = users
        .insert(NewUser {
            email,
            password_hash,
            full_name,
        })
        .await
        .map_err(|e| {
            if matches!(e, AppError::AlreadyExists) {
                warn!("email already registered");
            }
            e
        })?;

    info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// Unknown email and wrong password both yield `InvalidCredentials`.
#[instrument(skip(users, password))]
pub async fn authenticate(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let Some(user) = find_by_email(users, email).await? else {
        verify_against_dummy(password);
        warn!("login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

/// Decodes an access token and loads the user named by its subject.
#[instrument(skip(users, keys, token))]
pub async fn resolve_user(
    users: &dyn UserStore,
    keys: &JwtKeys,
    token: &str,
    require_active: bool,
) -> Result<User, AppError> {
    let claims = keys.decode(token, TokenKind::Access)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        warn!(sub = %claims.sub, "token subject is not a user id");
        AppError::InvalidIdentifier
    })?;

    let user = users.find_by_id(user_id).await?.ok_or_else(|| {
        warn!(%user_id, "token subject not found");
        AppError::NotFound
    })?;

    if require_active && !user.is_active {
        warn!(%user_id, "inactive user");
        return Err(AppError::InactiveUser);
    }

    Ok(user)
}
