use axum::{extract::State, response::IntoResponse, Extension};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::User;
use crate::error::ApiError;
use crate::handlers::cookies;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// POST /users/logout - Revoke the caller's refresh token and drop the cookies
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.logout(user.id).await?;
    tracing::info!("User {} logged out", user.username);

    Ok((
        cookies::clear_session(),
        ApiResponse::<Value>::success(json!({}), "User logged out."),
    ))
}

/// GET /users/current-user
pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<User> {
    let user = state.users.current_user(&user.id).await?;
    Ok(ApiResponse::success(user, "Current user fetched successfully."))
}
