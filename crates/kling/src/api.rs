//! REST API client for the Kling virtual try-on endpoints.
//!
//! [`TryOnApi`] is the seam between the polling logic and the network:
//! [`KlingApi`] implements it over [`reqwest`], tests implement it with a
//! scripted fake.

use std::time::Duration;

use async_trait::async_trait;

use crate::auth::TokenSigner;
use crate::config::KlingConfig;
use crate::messages::{Envelope, SubmitData, TaskId, TaskInfo, TryOnRequest};

/// Path of the try-on task collection, relative to the base URL.
pub const TRY_ON_PATH: &str = "/v1/images/kolors-virtual-try-on";

/// Per-request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    /// Task submission (uploads two images).
    pub submit: Duration,
    /// A single status query.
    pub poll: Duration,
    /// Result image download.
    pub download: Duration,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self {
            submit: Duration::from_secs(50),
            poll: Duration::from_secs(20),
            download: Duration::from_secs(60),
        }
    }
}

/// Errors from the Kling REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum KlingApiError {
    /// The request did not complete within its timeout.
    #[error("request timed out")]
    Timeout,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// Kling returned a non-2xx status code.
    #[error("Kling API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request token could not be signed.
    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<reqwest::Error> for KlingApiError {
    /// Only timeouts on an established connection are retriable; a connect
    /// timeout is a transport failure like any other.
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() && !e.is_connect() {
            KlingApiError::Timeout
        } else {
            KlingApiError::Request(e)
        }
    }
}

impl KlingApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, KlingApiError::Timeout)
    }
}

/// Operations the try-on flow needs from the remote service.
#[async_trait]
pub trait TryOnApi: Send + Sync {
    /// Submit a try-on task. Called exactly once per invocation.
    async fn submit(&self, request: &TryOnRequest) -> Result<TaskId, KlingApiError>;

    /// Fetch the current state of a task.
    async fn query(&self, task_id: &TaskId) -> Result<TaskInfo, KlingApiError>;

    /// Download a result image (unauthenticated).
    async fn download(&self, url: &str) -> Result<Vec<u8>, KlingApiError>;
}

/// HTTP client for the Kling API.
pub struct KlingApi {
    client: reqwest::Client,
    base_url: String,
    signer: TokenSigner,
    timeouts: ApiTimeouts,
}

impl KlingApi {
    /// Create an API client from an already-validated config.
    pub fn new(config: &KlingConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (shares the connection pool across clients).
    pub fn with_client(client: reqwest::Client, config: &KlingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            signer: TokenSigner::new(&config.access_key, &config.secret_key),
            timeouts: ApiTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: ApiTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}{}", self.base_url, TRY_ON_PATH)
    }

    fn task_url(&self, task_id: &TaskId) -> String {
        format!("{}{}/{}", self.base_url, TRY_ON_PATH, task_id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`KlingApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, KlingApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(KlingApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful response and unwrap its `data` field.
    async fn parse_data<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, KlingApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| KlingApiError::Malformed(format!("{e}")))?;
        envelope_data(envelope)
    }
}

/// Pull `data` out of an envelope, quoting the service message when absent.
fn envelope_data<T>(envelope: Envelope<T>) -> Result<T, KlingApiError> {
    match envelope.data {
        Some(data) => Ok(data),
        None => Err(KlingApiError::Malformed(format!(
            "response has no data (code {}, message {:?}, request_id {:?})",
            envelope.code.map_or_else(|| "-".to_string(), |c| c.to_string()),
            envelope.message.unwrap_or_default(),
            envelope.request_id.unwrap_or_default(),
        ))),
    }
}

#[async_trait]
impl TryOnApi for KlingApi {
    async fn submit(&self, request: &TryOnRequest) -> Result<TaskId, KlingApiError> {
        let response = self
            .client
            .post(self.tasks_url())
            .header(reqwest::header::AUTHORIZATION, self.signer.bearer_header()?)
            .json(request)
            .timeout(self.timeouts.submit)
            .send()
            .await?;

        let data: SubmitData = Self::parse_data(response).await?;
        Ok(data.task_id)
    }

    async fn query(&self, task_id: &TaskId) -> Result<TaskInfo, KlingApiError> {
        let response = self
            .client
            .get(self.task_url(task_id))
            .header(reqwest::header::AUTHORIZATION, self.signer.bearer_header()?)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .timeout(self.timeouts.poll)
            .send()
            .await?;

        Self::parse_data(response).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, KlingApiError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeouts.download)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
