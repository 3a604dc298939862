use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::Tweet;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Body of create and update. A missing or unparsable body reads as no content.
#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    pub content: Option<String>,
}

/// POST /tweets - Publish a tweet as the caller
pub async fn create_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Option<Json<ContentRequest>>,
) -> ApiResult<Tweet> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();

    let tweet = state
        .tweets
        .create_tweet(body.content.as_deref(), user.id)
        .await?;

    Ok(ApiResponse::created(tweet, "Tweet created successfully."))
}

/// PATCH /tweets/:tweet_id - Replace the content of one of the caller's tweets
pub async fn update_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tweet_id): Path<String>,
    payload: Option<Json<ContentRequest>>,
) -> ApiResult<Tweet> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();

    let tweet = state
        .tweets
        .update_tweet(&tweet_id, body.content.as_deref(), user.id)
        .await?;

    Ok(ApiResponse::success(tweet, "Tweet updated successfully."))
}

/// DELETE /tweets/:tweet_id - Permanently remove one of the caller's tweets
pub async fn delete_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tweet_id): Path<String>,
) -> ApiResult<Value> {
    state.tweets.delete_tweet(&tweet_id, user.id).await?;

    Ok(ApiResponse::success(json!({}), "Tweet deleted successfully."))
}
