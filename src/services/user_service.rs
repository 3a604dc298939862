use std::sync::Arc;

use serde::Serialize;

use crate::auth::{self, password};
use crate::config::AppConfig;
use crate::database::models::{NewUser, User};
use crate::database::{ObjectId, StoreError, UserStore};
use crate::error::ApiError;

#[derive(Debug, Default, Clone)]
pub struct RegisterInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    config: Arc<AppConfig>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<User, ApiError> {
        let (Some(full_name), Some(email), Some(username), Some(plain_password)) = (
            non_blank(input.full_name.as_deref()),
            non_blank(input.email.as_deref()),
            non_blank(input.username.as_deref()),
            non_blank(input.password.as_deref()),
        ) else {
            return Err(ApiError::validation("All fields are required."));
        };

        let username = username.trim().to_lowercase();
        let email = email.trim().to_lowercase();

        if self
            .store
            .find_by_username_or_email(Some(username.as_str()), Some(email.as_str()))
            .await?
            .is_some()
        {
            return Err(duplicate_user());
        }

        let hash = password::hash(plain_password).map_err(|e| {
            tracing::error!("{}", e);
            ApiError::internal("Something went wrong while registering the user.")
        })?;

        let user = self
            .store
            .create(NewUser {
                username,
                email,
                full_name: full_name.trim().to_string(),
                password: hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => duplicate_user(),
                other => other.into(),
            })?
            .ok_or_else(|| ApiError::internal("Something went wrong while registering the user."))?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, ApiError> {
        let username = non_blank(input.username.as_deref());
        let email = non_blank(input.email.as_deref());
        if username.is_none() && email.is_none() {
            return Err(ApiError::validation("username or email is required."));
        }

        let user = self
            .store
            .find_by_username_or_email(username, email)
            .await?
            .ok_or_else(|| ApiError::not_found("User does not exist."))?;

        if !password::verify(input.password.as_deref().unwrap_or_default(), &user.password) {
            tracing::warn!("Failed login for {}", user.username);
            return Err(ApiError::unauthorized("Invalid user credentials."));
        }

        let tokens = self.issue_tokens(&user).await?;
        Ok(LoginOutcome {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    pub async fn logout(&self, caller: ObjectId) -> Result<(), ApiError> {
        self.store.set_refresh_token(&caller, None).await?;
        Ok(())
    }

    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair, ApiError> {
        let token = non_blank(refresh_token)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized request."))?;

        let claims = auth::decode_refresh_token(token, &self.config.security).map_err(|e| {
            tracing::debug!("Rejected refresh token: {}", e);
            ApiError::unauthorized("Invalid refresh token.")
        })?;

        let user = self
            .store
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid refresh token."))?;

        if user.refresh_token.as_deref() != Some(auth::hash_refresh_token(token).as_str()) {
            return Err(ApiError::unauthorized("Refresh token is expired or used."));
        }

        self.issue_tokens(&user).await
    }

    pub async fn current_user(&self, caller: &ObjectId) -> Result<User, ApiError> {
        self.find_user(caller)
            .await?
            .ok_or_else(|| ApiError::not_found("User does not exist."))
    }

    pub async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        self.store.find_by_id(id).await
    }

    /// Signs a fresh pair and persists the refresh token's digest, which
    /// invalidates any previously issued refresh token
    async fn issue_tokens(&self, user: &User) -> Result<TokenPair, ApiError> {
        let access_token = auth::generate_access_token(user, &self.config.security)?;
        let refresh_token = auth::generate_refresh_token(user.id, &self.config.security)?;

        let digest = auth::hash_refresh_token(&refresh_token);
        self.store
            .set_refresh_token(&user.id, Some(digest.as_str()))
            .await?
            .ok_or_else(|| ApiError::internal("Something went wrong while generating tokens."))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn duplicate_user() -> ApiError {
    ApiError::conflict("User with email or username already exists.")
}
