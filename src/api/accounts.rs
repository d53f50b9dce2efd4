//! Signup and login endpoints.

use axum::{extract::State, http::HeaderMap};

use super::{created, success, ApiResult, JsonBody};
use crate::auth::{bearer_token, hash_password_blocking, verify_password_blocking};
use crate::errors::AppError;
use crate::models::{Credentials, SignupResponse, TokenResponse};
use crate::AppState;

const BAD_CREDENTIALS: &str = "Invalid login or password";

fn require_credentials(credentials: &Credentials) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if credentials.login.trim().is_empty() {
        missing.push("login".to_string());
    }
    if credentials.password.is_empty() {
        missing.push("password".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingFields(missing))
    }
}

/// POST /signup - Register a login with a hashed password.
///
/// With write protection on, only a signed-in user may add accounts. The one
/// exception is the very first account, created while no user exists yet.
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<SignupResponse> {
    require_credentials(&credentials)?;

    let authorized = match bearer_token(&headers) {
        _ if !state.config.require_auth => true,
        Some(token) => state.tokens.verify(token).map(|_| true)?,
        None => false,
    };

    let login = credentials.login.trim().to_string();
    let hash = hash_password_blocking(credentials.password).await?;

    let user = if authorized {
        state.repo.create_user(&login, &hash).await?
    } else {
        let Some(user) = state.repo.create_first_user(&login, &hash).await? else {
            tracing::debug!("Refused anonymous signup for {}", login);
            return Err(AppError::Unauthorized(
                "Signing up requires a bearer token".to_string(),
            ));
        };
        tracing::info!("Bootstrapped first account {}", user.login);
        user
    };

    tracing::info!("Registered user {}", user.login);
    created(SignupResponse {
        id: user.id,
        login: user.login,
    })
}

/// POST /login - Exchange credentials for a signed token.
///
/// Unknown logins and wrong passwords get the same answer.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> ApiResult<TokenResponse> {
    require_credentials(&credentials)?;

    let login = credentials.login.trim();
    let Some(user) = state.repo.find_user_by_login(login).await? else {
        tracing::debug!("Login attempt for unknown user");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    };

    if !verify_password_blocking(credentials.password, user.password_hash).await? {
        tracing::debug!("Wrong password for {}", user.login);
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    success(TokenResponse {
        token: state.tokens.issue(&user.login)?,
    })
}
