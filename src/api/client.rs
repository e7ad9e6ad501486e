//! HTTP client for the management API.
//!
//! Wraps the platform's REST API (typically on port 9000) and exposes the
//! typed fetches the graph builder needs. Supports either a pre-issued bearer
//! token or username/password login; on an on-prem leader node the API may
//! accept unauthenticated requests, so credentials are optional.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pipewatch::api::ManagementClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ManagementClient::builder()
//!         .base_url("http://localhost:9000")
//!         .credentials("admin", "secret")
//!         .build();
//!     client.authenticate().await?;
//!
//!     for group in client.fetch_groups().await? {
//!         println!("worker group: {}", group.id);
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::types::{Endpoint, HealthRecord, ItemList, PipelineRecord, StatusRecord, WorkerGroup};

/// Errors from the management API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse a response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for a response.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Connection(err.to_string())
        } else {
            ApiError::Http(err.to_string())
        }
    }
}

/// Client for the pipeline platform's management API.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl ManagementClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> ManagementClientBuilder {
        ManagementClientBuilder::default()
    }

    /// Log in with the configured username/password and store the returned
    /// bearer token.
    ///
    /// A no-op when a token is already set or no credentials were given (the
    /// latter is valid for on-prem leader nodes without auth).
    pub async fn authenticate(&mut self) -> Result<(), ApiError> {
        if self.token.is_some() {
            return Ok(());
        }
        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            return Ok(());
        };

        let url = format!("{}/api/v1/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }
        if !response.status().is_success() {
            return Err(ApiError::Http(format!(
                "Login returned status {}",
                response.status()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        match body.token {
            Some(token) => {
                debug!("authenticated against management API");
                self.token = Some(token);
                Ok(())
            }
            None => Err(ApiError::Auth(
                "token not found in login response".to_string(),
            )),
        }
    }

    /// Fetch all worker groups.
    pub async fn fetch_groups(&self) -> Result<Vec<WorkerGroup>, ApiError> {
        self.get_items("/api/v1/groups").await
    }

    /// Fetch the sources configured on a worker group.
    pub async fn fetch_sources(&self, group_id: &str) -> Result<Vec<Endpoint>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/sources"))
            .await
    }

    /// Fetch the destinations configured on a worker group.
    pub async fn fetch_destinations(&self, group_id: &str) -> Result<Vec<Endpoint>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/destinations"))
            .await
    }

    /// Fetch throughput status for a group's sources.
    pub async fn fetch_source_status(&self, group_id: &str) -> Result<Vec<StatusRecord>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/sources/status"))
            .await
    }

    /// Fetch throughput status for a group's destinations.
    pub async fn fetch_destination_status(
        &self,
        group_id: &str,
    ) -> Result<Vec<StatusRecord>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/destinations/status"))
            .await
    }

    /// Fetch health metrics for a group's sources.
    pub async fn fetch_source_health(&self, group_id: &str) -> Result<Vec<HealthRecord>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/sources/health"))
            .await
    }

    /// Fetch health metrics for a group's destinations.
    pub async fn fetch_destination_health(
        &self,
        group_id: &str,
    ) -> Result<Vec<HealthRecord>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/destinations/health"))
            .await
    }

    /// Fetch throughput status for a group's pipelines, keyed by pipeline id.
    pub async fn fetch_pipeline_status(
        &self,
        group_id: &str,
    ) -> Result<Vec<StatusRecord>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/pipelines/status"))
            .await
    }

    /// Fetch summary records for all pipelines on a worker group.
    pub async fn fetch_pipelines(&self, group_id: &str) -> Result<Vec<PipelineRecord>, ApiError> {
        self.get_items(&format!("/api/v1/groups/{group_id}/pipelines"))
            .await
    }

    /// Fetch the detailed record for one pipeline, including its function
    /// list. Single-item routes still use the `items` envelope.
    pub async fn fetch_pipeline_detail(
        &self,
        group_id: &str,
        pipeline_id: &str,
    ) -> Result<PipelineRecord, ApiError> {
        let items: Vec<PipelineRecord> = self
            .get_items(&format!("/api/v1/groups/{group_id}/pipelines/{pipeline_id}"))
            .await?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Http(format!("Pipeline '{}' not found", pipeline_id)))
    }

    async fn get_items<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth("Invalid or expired token".to_string()));
        }
        if !response.status().is_success() {
            return Err(ApiError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let list: ItemList<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(list.items)
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Builder for [`ManagementClient`].
#[derive(Debug, Default)]
pub struct ManagementClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl ManagementClientBuilder {
    /// Set the API base URL (e.g., "http://localhost:9000").
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a pre-issued bearer token. Takes precedence over credentials.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the username and password used by [`ManagementClient::authenticate`].
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> ManagementClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        ManagementClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| "http://localhost:9000".to_string()),
            token: self.token,
            username: self.username,
            password: self.password,
        }
    }
}
