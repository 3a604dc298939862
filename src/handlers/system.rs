use axum::extract::State;
use chrono::Utc;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET / - Service banner and route map
pub async fn root() -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Ok(ApiResponse::success(
        json!({
            "name": "Tweet API",
            "version": version,
            "endpoints": {
                "users": "/users/register, /users/login, /users/access-refresh (public); /users/logout, /users/current-user (protected)",
                "tweets": "/tweets/user/:userId (public); /tweets, /tweets/:tweetId (protected)",
                "health": "/health (public)",
            }
        }),
        "Tweet API is running",
    ))
}

/// GET /health - Liveness plus a store round-trip
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = Utc::now();

    match state.tweets.ping().await {
        Ok(()) => Ok(ApiResponse::success(
            json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            }),
            "Healthy",
        )),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
