//! Bounded polling of a submitted try-on task.
//!
//! After a fixed grace delay the task is queried up to
//! [`PollPolicy::max_attempts`] times, sleeping [`PollPolicy::interval`]
//! after every non-terminal attempt. A read timeout is retried like a
//! pending status unless it happens on the last attempt. Any other query
//! error aborts the poll.

use std::time::Duration;

use crate::api::{KlingApiError, TryOnApi};
use crate::messages::{TaskId, TaskStatus};

/// Polling schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait before the first query; the service never finishes sooner.
    pub initial_delay: Duration,
    /// Wait between queries.
    pub interval: Duration,
    /// Maximum number of queries.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(9),
            interval: Duration::from_secs(1),
            max_attempts: 12,
        }
    }
}

/// How a poll ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Task succeeded; holds the result image URL.
    Succeeded(String),
    /// Task failed remotely; holds the service's message.
    Failed(String),
    /// The final attempt hit a read timeout.
    TimedOut,
    /// Every attempt reported a non-terminal status.
    Exhausted,
}

/// Poll `task_id` until it reaches a terminal state or the budget runs out.
pub async fn poll_task<A: TryOnApi + ?Sized>(
    api: &A,
    task_id: &TaskId,
    policy: &PollPolicy,
) -> Result<PollOutcome, KlingApiError> {
    tokio::time::sleep(policy.initial_delay).await;

    for attempt in 1..=policy.max_attempts {
        match api.query(task_id).await {
            Ok(info) => match info.status() {
                TaskStatus::Succeeded => {
                    let url = info.first_image_url().ok_or_else(|| {
                        KlingApiError::Malformed("succeeded task has no result image".into())
                    })?;
                    tracing::info!(task_id = %task_id, attempt, "Try-on task succeeded");
                    return Ok(PollOutcome::Succeeded(url.to_string()));
                }
                TaskStatus::Failed => {
                    let msg = info.task_status_msg.unwrap_or_default();
                    tracing::warn!(task_id = %task_id, attempt, reason = %msg, "Try-on task failed");
                    return Ok(PollOutcome::Failed(msg));
                }
                TaskStatus::Pending(status) => {
                    tracing::debug!(task_id = %task_id, attempt, status = %status, "Task pending");
                }
            },
            Err(e) if e.is_timeout() => {
                if attempt == policy.max_attempts {
                    tracing::warn!(task_id = %task_id, attempt, "Final status query timed out");
                    return Ok(PollOutcome::TimedOut);
                }
                tracing::warn!(task_id = %task_id, attempt, "Status query timed out, retrying");
            }
            Err(e) => return Err(e),
        }

        tokio::time::sleep(policy.interval).await;
    }

    tracing::warn!(
        task_id = %task_id,
        attempts = policy.max_attempts,
        "Task still pending after all attempts",
    );
    Ok(PollOutcome::Exhausted)
}
