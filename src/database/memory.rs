use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::{NewTweet, NewUser, Tweet, User};
use crate::database::object_id::ObjectId;
use crate::database::store::{StoreError, TweetStore, UserStore};

/// In-process store backing `serve --in-memory` and the test suites.
/// Records live in insertion order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tweets: Arc<RwLock<Vec<Tweet>>>,
    users: Arc<RwLock<Vec<User>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with `StoreError::Unavailable`.
    #[cfg(test)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TweetStore for MemoryStore {
    async fn create(&self, tweet: NewTweet) -> Result<Option<Tweet>, StoreError> {
        self.check_online()?;
        let tweet = tweet.into_tweet();
        self.tweets.write().await.push(tweet.clone());
        Ok(Some(tweet))
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tweet>, StoreError> {
        self.check_online()?;
        let tweets = self.tweets.read().await;
        Ok(tweets.iter().find(|t| &t.id == id).cloned())
    }

    async fn contents_by_owner(&self, owner: &ObjectId) -> Result<Vec<String>, StoreError> {
        self.check_online()?;
        let tweets = self.tweets.read().await;
        Ok(tweets
            .iter()
            .filter(|t| &t.owner == owner)
            .map(|t| t.content.clone())
            .collect())
    }

    async fn update_content(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        content: &str,
    ) -> Result<Option<Tweet>, StoreError> {
        self.check_online()?;
        let mut tweets = self.tweets.write().await;
        let Some(tweet) = tweets.iter_mut().find(|t| &t.id == id && &t.owner == owner) else {
            return Ok(None);
        };
        tweet.content = content.to_string();
        tweet.updated_at = Utc::now();
        Ok(Some(tweet.clone()))
    }

    async fn delete(&self, id: &ObjectId, owner: &ObjectId) -> Result<Option<Tweet>, StoreError> {
        self.check_online()?;
        let mut tweets = self.tweets.write().await;
        match tweets.iter().position(|t| &t.id == id && &t.owner == owner) {
            Some(idx) => Ok(Some(tweets.remove(idx))),
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(StoreError::Duplicate(user.username));
        }
        let user = user.into_user();
        users.push(user.clone());
        Ok(Some(user))
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let username = username.map(str::to_lowercase);
        let email = email.map(str::to_lowercase);
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| {
                username.as_deref() == Some(u.username.as_str())
                    || email.as_deref() == Some(u.email.as_str())
            })
            .cloned())
    }

    async fn set_refresh_token(
        &self,
        id: &ObjectId,
        token_hash: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };
        user.refresh_token = token_hash.map(str::to_string);
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}
