use axum::extract::{Path, State};

use crate::app::AppState;
use crate::database::models::UserTweets;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /tweets/user/:user_id - Contents of every tweet the user owns
pub async fn user_tweets(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<UserTweets>> {
    let groups = state.tweets.get_user_tweets(&user_id).await?;

    if groups.is_empty() {
        return Ok(ApiResponse::success(groups, "User have no tweets"));
    }
    Ok(ApiResponse::success(
        groups,
        "Tweet for the user fetched successfully!",
    ))
}
