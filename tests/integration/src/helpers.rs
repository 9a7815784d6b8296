//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting tokens and making
//! HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use toolrank_api::{create_app, create_app_state};
use toolrank_common::{AppConfig, JwtService};
use toolrank_core::UserId;

/// Secret shared between the test server and the token minting helper
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Token lifetime for minted test tokens
const TOKEN_TTL_SECONDS: i64 = 3600;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    admin_role: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on the in-memory backend
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.auth.jwt_secret, config.auth.audience.clone());
        let admin_role = config.auth.admin_role.clone();

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        // Ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            admin_role,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Mint a token the server accepts for `user_id`
    pub fn token_for(&self, user_id: &str) -> Result<String> {
        let user_id = UserId::parse(user_id)?;
        Ok(self.jwt.issue_token(&user_id, None, TOKEN_TTL_SECONDS)?)
    }

    /// Mint a token carrying the configured admin role
    pub fn admin_token(&self, user_id: &str) -> Result<String> {
        let user_id = UserId::parse(user_id)?;
        Ok(self
            .jwt
            .issue_token(&user_id, Some(&self.admin_role), TOKEN_TTL_SECONDS)?)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_json_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request without credentials
    pub async fn post_anonymous(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).send().await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).bearer_auth(token).send().await?)
    }
}

/// In-memory configuration with a burst large enough for any single test
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::in_memory(TEST_JWT_SECRET);
    config.rate_limit.burst = 1000;
    config
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
