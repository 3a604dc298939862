use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::object_id::{InvalidObjectId, ObjectId};

/// Registered account. The password hash and refresh token hash never
/// leave the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Already hashed
    pub password: String,
}

impl NewUser {
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: ObjectId::new(),
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            password: self.password,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = InvalidObjectId;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id.parse()?,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            password: row.password,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_not_serialized() {
        let mut user = NewUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice".into(),
            password: "$argon2id$hash".into(),
        }
        .into_user();
        user.refresh_token = Some("abc".into());

        let v = serde_json::to_value(&user).unwrap();
        assert!(v.get("password").is_none());
        assert!(v.get("refreshToken").is_none());
        assert_eq!(v["fullName"], "Alice");
        assert_eq!(v["_id"], user.id.to_hex());
    }
}
