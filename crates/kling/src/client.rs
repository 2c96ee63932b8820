//! The try-on job client: submit, poll, fetch.
//!
//! [`KlingClient`] runs one try-on as a single sequential task. It owns
//! only immutable configuration, so one instance can serve concurrent
//! invocations behind an `Arc`.

use tryon_core::codec;
use tryon_core::error::CoreError;
use tryon_core::types::{RgbImage, Seed};
use validator::Validate;

use crate::api::{KlingApi, KlingApiError, TryOnApi};
use crate::config::{ConfigError, KlingConfig};
use crate::messages::TryOnRequest;
use crate::poller::{poll_task, PollOutcome, PollPolicy};

/// Status message reported for a successful try-on.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Errors that end a try-on without a result image.
#[derive(Debug, thiserror::Error)]
pub enum TryOnError {
    /// Bad input or an image that could not be encoded/decoded.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Submission, status query or download failed.
    #[error(transparent)]
    Api(#[from] KlingApiError),

    /// The service reported the task as failed.
    #[error("{0}")]
    RemoteFailed(String),

    /// The last status query timed out.
    #[error("Request timed out")]
    TimedOut,

    /// The task never reached a terminal state.
    #[error("Processing took too long")]
    TookTooLong,
}

impl TryOnError {
    /// Message shown to the end user.
    pub fn user_message(&self) -> String {
        match self {
            TryOnError::Core(CoreError::EmptyImage { .. })
            | TryOnError::TimedOut
            | TryOnError::TookTooLong => self.to_string(),
            other => format!("Error: {other}"),
        }
    }
}

/// Client for the Kling virtual try-on service.
pub struct KlingClient<A = KlingApi> {
    api: A,
    policy: PollPolicy,
}

impl KlingClient<KlingApi> {
    /// Validate `config` and build a client over HTTP.
    ///
    /// Blank credentials or a malformed base URL are rejected here, before
    /// any request is attempted.
    pub fn new(config: KlingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_api(KlingApi::new(&config)))
    }
}

impl<A: TryOnApi> KlingClient<A> {
    /// Build a client over any [`TryOnApi`] implementation.
    pub fn with_api(api: A) -> Self {
        Self {
            api,
            policy: PollPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one try-on job and return the decoded result.
    ///
    /// Submission is attempted exactly once. Both images must be present;
    /// otherwise [`CoreError::EmptyImage`] is returned without touching the
    /// network.
    pub async fn try_on(
        &self,
        person: Option<&RgbImage>,
        garment: Option<&RgbImage>,
        seed: Seed,
    ) -> Result<RgbImage, TryOnError> {
        let person = codec::require_image(person, "person")?;
        let garment = codec::require_image(garment, "garment")?;

        let request = TryOnRequest::new(
            codec::encode_for_transport(person)?,
            codec::encode_for_transport(garment)?,
            seed,
        );

        let task_id = self.api.submit(&request).await?;
        tracing::info!(task_id = %task_id, seed, "Submitted try-on task");

        match poll_task(&self.api, &task_id, &self.policy).await? {
            PollOutcome::Succeeded(url) => {
                let bytes = self.api.download(&url).await?;
                let image = codec::decode_from_transport(&bytes)?;
                tracing::info!(
                    task_id = %task_id,
                    width = image.width(),
                    height = image.height(),
                    "Downloaded try-on result",
                );
                Ok(image)
            }
            PollOutcome::Failed(msg) => Err(TryOnError::RemoteFailed(msg)),
            PollOutcome::TimedOut => Err(TryOnError::TimedOut),
            PollOutcome::Exhausted => Err(TryOnError::TookTooLong),
        }
    }
}
