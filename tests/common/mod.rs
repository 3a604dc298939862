#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

use tweet_api::config::AppConfig;
use tweet_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Serves a fresh in-memory app on an unused port for the lifetime of the
    /// calling test's runtime
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let router = app(AppState::in_memory(AppConfig::development()));
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    pub async fn register(&self, username: &str) -> Result<Value> {
        let res = self
            .post("/users/register")
            .json(&json!({
                "fullName": format!("{} Tester", username),
                "email": format!("{}@example.com", username),
                "username": username,
                "password": "s3cret-pass",
            }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
        let body: Value = res.json().await?;
        Ok(body["data"].clone())
    }

    pub async fn login(&self, username: &str) -> Result<Session> {
        let res = self
            .post("/users/login")
            .json(&json!({ "username": username, "password": "s3cret-pass" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        let data = &body["data"];
        Ok(Session {
            user_id: field(&data["user"]["_id"], "user id")?,
            access_token: field(&data["accessToken"], "access token")?,
            refresh_token: field(&data["refreshToken"], "refresh token")?,
        })
    }

    /// Registers and logs in a user in one step
    pub async fn signup(&self, username: &str) -> Result<Session> {
        self.register(username).await?;
        self.login(username).await
    }
}

fn field(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("missing {}", what))
}

pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Status plus parsed envelope
pub async fn envelope(res: Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}
