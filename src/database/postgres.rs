use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::tweet::TweetRow;
use crate::database::models::user::UserRow;
use crate::database::models::{NewTweet, NewUser, Tweet, User};
use crate::database::object_id::ObjectId;
use crate::database::store::{StoreError, TweetStore, UserStore};

const TWEET_COLUMNS: &str = "id, content, owner, created_at, updated_at";
const USER_COLUMNS: &str =
    "id, username, email, full_name, password, refresh_token, created_at, updated_at";

/// sqlx-backed store over the `tweets` and `users` tables
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn tweet_from_row(row: Option<TweetRow>) -> Result<Option<Tweet>, StoreError> {
    row.map(Tweet::try_from).transpose().map_err(StoreError::from)
}

fn user_from_row(row: Option<UserRow>) -> Result<Option<User>, StoreError> {
    row.map(User::try_from).transpose().map_err(StoreError::from)
}

fn map_unique_violation(err: sqlx::Error, what: &str) -> StoreError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => StoreError::Duplicate(what.to_string()),
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl TweetStore for PgStore {
    async fn create(&self, tweet: NewTweet) -> Result<Option<Tweet>, StoreError> {
        let tweet = tweet.into_tweet();
        let sql = format!(
            "INSERT INTO tweets ({TWEET_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {TWEET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TweetRow>(&sql)
            .bind(tweet.id.to_hex())
            .bind(&tweet.content)
            .bind(tweet.owner.to_hex())
            .bind(tweet.created_at)
            .bind(tweet.updated_at)
            .fetch_optional(&self.pool)
            .await?;
        tweet_from_row(row)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Tweet>, StoreError> {
        let sql = format!("SELECT {TWEET_COLUMNS} FROM tweets WHERE id = $1");
        let row = sqlx::query_as::<_, TweetRow>(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        tweet_from_row(row)
    }

    async fn contents_by_owner(&self, owner: &ObjectId) -> Result<Vec<String>, StoreError> {
        let contents = sqlx::query_scalar::<_, String>(
            "SELECT content FROM tweets WHERE owner = $1 ORDER BY seq",
        )
        .bind(owner.to_hex())
        .fetch_all(&self.pool)
        .await?;
        Ok(contents)
    }

    async fn update_content(
        &self,
        id: &ObjectId,
        owner: &ObjectId,
        content: &str,
    ) -> Result<Option<Tweet>, StoreError> {
        let sql = format!(
            "UPDATE tweets SET content = $3, updated_at = NOW() \
             WHERE id = $1 AND owner = $2 RETURNING {TWEET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TweetRow>(&sql)
            .bind(id.to_hex())
            .bind(owner.to_hex())
            .bind(content)
            .fetch_optional(&self.pool)
            .await?;
        tweet_from_row(row)
    }

    async fn delete(&self, id: &ObjectId, owner: &ObjectId) -> Result<Option<Tweet>, StoreError> {
        let sql = format!(
            "DELETE FROM tweets WHERE id = $1 AND owner = $2 RETURNING {TWEET_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TweetRow>(&sql)
            .bind(id.to_hex())
            .bind(owner.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        tweet_from_row(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> Result<Option<User>, StoreError> {
        let user = user.into_user();
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.id.to_hex())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password)
            .bind(&user.refresh_token)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &user.username))?;
        user_from_row(row)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        user_from_row(row)
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        // NULL binds never match, so an absent field simply drops out
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $2 LIMIT 1"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username.map(str::to_lowercase))
            .bind(email.map(str::to_lowercase))
            .fetch_optional(&self.pool)
            .await?;
        user_from_row(row)
    }

    async fn set_refresh_token(
        &self,
        id: &ObjectId,
        token_hash: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "UPDATE users SET refresh_token = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.to_hex())
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await?;
        user_from_row(row)
    }
}
