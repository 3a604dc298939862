pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;
use crate::database::ObjectId;

/// Short-lived token presented on guarded routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: ObjectId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Long-lived token exchanged at /users/access-refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: ObjectId,
    /// Makes every issued token distinct, even within the same second
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Encode(String),

    #[error("Invalid JWT token: {0}")]
    Invalid(String),
}

impl AccessClaims {
    pub fn new(user: &User, config: &SecurityConfig) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(config.access_token_expiry_hours as i64)).timestamp();
        Self {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            exp,
            iat: now.timestamp(),
        }
    }
}

impl RefreshClaims {
    pub fn new(user_id: ObjectId, config: &SecurityConfig) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::days(config.refresh_token_expiry_days as i64)).timestamp();
        Self {
            sub: user_id,
            jti: Uuid::new_v4().simple().to_string(),
            exp,
            iat: now.timestamp(),
        }
    }
}

pub fn generate_access_token(user: &User, config: &SecurityConfig) -> Result<String, JwtError> {
    sign(&AccessClaims::new(user, config), &config.access_token_secret)
}

pub fn generate_refresh_token(
    user_id: ObjectId,
    config: &SecurityConfig,
) -> Result<String, JwtError> {
    sign(&RefreshClaims::new(user_id, config), &config.refresh_token_secret)
}

pub fn decode_access_token(token: &str, config: &SecurityConfig) -> Result<AccessClaims, JwtError> {
    verify(token, &config.access_token_secret)
}

pub fn decode_refresh_token(
    token: &str,
    config: &SecurityConfig,
) -> Result<RefreshClaims, JwtError> {
    verify(token, &config.refresh_token_secret)
}

/// Refresh tokens are persisted only as a SHA-256 digest
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn sign<T: Serialize>(claims: &T, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::Encode(e.to_string()))
}

fn verify<T: DeserializeOwned>(token: &str, secret: &str) -> Result<T, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<T>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::Invalid(e.to_string()))
}
