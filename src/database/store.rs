use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{NewTweet, NewUser, Tweet, User};
use crate::database::object_id::{InvalidObjectId, ObjectId};

/// Errors surfaced by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Corrupt record: {0}")]
    Corrupt(#[from] InvalidObjectId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Tweet persistence. Mutations return `None` when nothing was written.
#[async_trait]
pub trait TweetStore: Send + Sync {
    async fn create(&self, tweet: NewTweet) -> Result<Option<Tweet>, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tweet>, StoreError>;

    /// Contents of every tweet owned by `owner`, in storage order.
    async fn contents_by_owner(&self, owner: &ObjectId) -> Result<Vec<String>, StoreError>;

    /// Sets `content` on the tweet only if it is still owned by `owner`.
    async fn update_content(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        content: &str,
    ) -> Result<Option<Tweet>, StoreError>;

    /// Removes the tweet only if it is still owned by `owner`.
    async fn delete(&self, id: &ObjectId, owner: &ObjectId) -> Result<Option<Tweet>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError>;

    /// First user matching either the username or the email, both compared
    /// lowercased.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError>;

    /// Replaces the stored refresh token hash (`None` clears it).
    async fn set_refresh_token(
        &self,
        id: &ObjectId,
        token_hash: Option<&str>,
    ) -> Result<Option<User>, StoreError>;
}
