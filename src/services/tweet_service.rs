use std::sync::Arc;

use crate::database::models::{NewTweet, Tweet, UserTweets};
use crate::database::{ObjectId, StoreError, TweetStore};
use crate::error::ApiError;

/// Tweet CRUD with ownership rules. The caller's id is always passed in
/// explicitly by the handler.
#[derive(Clone)]
pub struct TweetService {
    store: Arc<dyn TweetStore>,
}

impl TweetService {
    pub fn new(store: Arc<dyn TweetStore>) -> Self {
        Self { store }
    }

    pub async fn create_tweet(
        &self,
        content: Option<&str>,
        owner: ObjectId,
    ) -> Result<Tweet, ApiError> {
        let content = require_content(content)?;

        let tweet = self
            .store
            .create(NewTweet {
                content: content.to_string(),
                owner,
            })
            .await?
            .ok_or_else(|| ApiError::internal("Something went wrong while creating tweet."))?;

        tracing::debug!("Created tweet {} for {}", tweet.id, owner);
        Ok(tweet)
    }

    /// All contents of `user_id`'s tweets as a single group, or no group at
    /// all when the user has not tweeted.
    pub async fn get_user_tweets(&self, user_id: &str) -> Result<Vec<UserTweets>, ApiError> {
        let owner = ObjectId::parse_str(user_id)
            .map_err(|_| ApiError::validation("Invalid user id."))?;

        let tweets = self
            .store
            .contents_by_owner(&owner)
            .await
            .map_err(fetch_failure)?;

        if tweets.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![UserTweets { tweets }])
    }

    pub async fn update_tweet(
        &self,
        tweet_id: &str,
        content: Option<&str>,
        caller: ObjectId,
    ) -> Result<Tweet, ApiError> {
        let tweet_id = parse_tweet_id(tweet_id)?;
        let content = require_content(content)?;

        self.load_owned(&tweet_id, caller, "update").await?;

        self.store
            .update_content(&tweet_id, &caller, content)
            .await?
            .ok_or_else(|| ApiError::internal("Something went wrong while updating the tweet."))
    }

    pub async fn delete_tweet(&self, tweet_id: &str, caller: ObjectId) -> Result<(), ApiError> {
        let tweet_id = parse_tweet_id(tweet_id)?;

        self.load_owned(&tweet_id, caller, "delete").await?;

        self.store
            .delete(&tweet_id, &caller)
            .await?
            .ok_or_else(|| ApiError::internal("Something went wrong while deleting the tweet."))?;

        tracing::debug!("Deleted tweet {}", tweet_id);
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    /// 404 when missing, 401 when `caller` is not the owner
    async fn load_owned(
        &self,
        tweet_id: &ObjectId,
        caller: ObjectId,
        action: &str,
    ) -> Result<Tweet, ApiError> {
        let tweet = self
            .store
            .find_by_id(tweet_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Tweet not found."))?;

        if tweet.owner != caller {
            tracing::warn!(
                "User {} tried to {} tweet {} owned by {}",
                caller,
                action,
                tweet.id,
                tweet.owner
            );
            return Err(ApiError::unauthorized(format!(
                "You don't have the permission to {} this tweet.",
                action
            )));
        }

        Ok(tweet)
    }
}

fn require_content(content: Option<&str>) -> Result<&str, ApiError> {
    match content {
        Some(c) if !is_blank(c) => Ok(c),
        _ => Err(ApiError::validation("tweet is required.")),
    }
}

/// Whitespace plus the byte-order mark, which clients sometimes send alone
fn is_blank(content: &str) -> bool {
    content
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

fn parse_tweet_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::validation("Invalid tweet id."))
}

/// Listing failures carry the store's own message
fn fetch_failure(err: StoreError) -> ApiError {
    let message = err.to_string();
    if message.is_empty() {
        ApiError::internal("Unable to fetch tweets")
    } else {
        ApiError::internal(message)
    }
}
