use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::object_id::{InvalidObjectId, ObjectId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub content: String,
    pub owner: ObjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTweet {
    pub content: String,
    pub owner: ObjectId,
}

impl NewTweet {
    pub fn into_tweet(self) -> Tweet {
        let now = Utc::now();
        Tweet {
            id: ObjectId::new(),
            content: self.content,
            owner: self.owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Contents of every tweet of one owner, grouped into a single sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTweets {
    pub tweets: Vec<String>,
}

/// Row shape of the `tweets` table
#[derive(Debug, FromRow)]
pub struct TweetRow {
    pub id: String,
    pub content: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TweetRow> for Tweet {
    type Error = InvalidObjectId;

    fn try_from(row: TweetRow) -> Result<Self, Self::Error> {
        Ok(Tweet {
            id: row.id.parse()?,
            content: row.content,
            owner: row.owner.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
