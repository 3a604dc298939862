use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::cookies::{self, REFRESH_COOKIE};
use crate::middleware::auth::cookie_value;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{LoginInput, RegisterInput};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// POST /users/register - Create an account
///
/// ```json
/// { "fullName": "string", "email": "string", "username": "string", "password": "string" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> ApiResult<User> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();

    let user = state
        .users
        .register(RegisterInput {
            full_name: body.full_name,
            email: body.email,
            username: body.username,
            password: body.password,
        })
        .await?;

    Ok(ApiResponse::created(user, "User registered successfully."))
}

/// POST /users/login - Exchange credentials for an access/refresh token pair
///
/// Either `username` or `email` identifies the account. Tokens are returned
/// in the body and as http-only cookies.
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();

    let outcome = state
        .users
        .login(LoginInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    tracing::info!("User {} logged in", outcome.user.username);
    let cookies = cookies::set_session(&outcome.access_token, &outcome.refresh_token);
    Ok((cookies, ApiResponse::success(outcome, "User logged in successfully.")))
}

/// POST /users/access-refresh - Rotate the token pair
///
/// The refresh token is read from the body, falling back to the
/// `refreshToken` cookie.
pub async fn refresh_access_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();
    let token = body
        .refresh_token
        .or_else(|| cookie_value(&headers, REFRESH_COOKIE));

    let tokens = state.users.refresh(token.as_deref()).await?;

    let cookies = cookies::set_session(&tokens.access_token, &tokens.refresh_token);
    Ok((cookies, ApiResponse::success(tokens, "Access token refreshed.")))
}
