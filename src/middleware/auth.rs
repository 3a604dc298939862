use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::decode_access_token;
use crate::database::models::User;
use crate::database::ObjectId;
use crate::error::ApiError;
use crate::handlers::cookies::ACCESS_COOKIE;

/// Authenticated caller, attached to request extensions by the guard
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
        }
    }
}

/// Resolves the caller from an access token, confirms the account still
/// exists and injects `AuthUser` into the request
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Unauthorized request."))?;

    let claims = decode_access_token(&token, &state.config.security)?;

    let user = state.users.find_user(&claims.sub).await?.ok_or_else(|| {
        tracing::warn!("Access token for unknown user {}", claims.sub);
        ApiError::unauthorized("Invalid access token.")
    })?;

    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}

/// Bearer header first, then the `accessToken` cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let token = value.to_str().ok()?.strip_prefix("Bearer ")?.trim();
        return (!token.is_empty()).then(|| token.to_string());
    }

    cookie_value(headers, ACCESS_COOKIE)
}

pub(crate) fn cookie_value(headers: &HeaderMap, cookie: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}
