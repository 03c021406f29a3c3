//! Client for Freepik's Mystic text-to-image API.
//!
//! A generation is a task: submit it, then poll its status until it
//! completes, fails or the attempt budget runs out. Polling happens inside
//! the caller's future, so dropping the future stops it.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::IntegrationError;
use crate::http::{env_opt, parse_response};

pub const DEFAULT_BASE_URL: &str = "https://api.freepik.com";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_FAILED: &str = "FAILED";

/// How often and how long to poll a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FreepikConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub poll: PollPolicy,
}

impl FreepikConfig {
    /// Load from `FREEPIK_API_KEY`, `FREEPIK_BASE_URL`,
    /// `FREEPIK_POLL_INTERVAL_MS` and `FREEPIK_MAX_POLL_ATTEMPTS`.
    pub fn from_env() -> Self {
        let defaults = PollPolicy::default();
        let interval_ms = env_opt("FREEPIK_POLL_INTERVAL_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        let max_attempts = env_opt("FREEPIK_MAX_POLL_ATTEMPTS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_attempts);

        Self {
            api_key: env_opt("FREEPIK_API_KEY"),
            base_url: env_opt("FREEPIK_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            poll: PollPolicy {
                interval: Duration::from_millis(interval_ms),
                max_attempts,
            },
        }
    }
}

/// Body of a design generation request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DesignRequest {
    pub prompt: String,
    /// Aspect ratio identifier, e.g. `square_1_1` or `portrait_2_3`.
    pub aspect_ratio: Option<String>,
}

/// Snapshot of a task as reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatus {
    pub task_id: String,
    pub status: String,
    #[serde(default)]
    pub generated: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TaskEnvelope {
    data: TaskStatus,
}

/// Terminal state of a generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DesignOutcome {
    Completed { task_id: String, images: Vec<String> },
    Failed { task_id: String, status: String },
}

#[derive(Debug, Clone)]
pub struct FreepikClient {
    client: reqwest::Client,
    config: FreepikConfig,
}

impl FreepikClient {
    pub fn new(config: FreepikConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: FreepikConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, IntegrationError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(IntegrationError::MissingApiKey("FREEPIK_API_KEY"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Submit a text-to-image task.
    ///
    /// `POST /v1/ai/mystic`
    pub async fn submit(&self, request: &DesignRequest) -> Result<TaskStatus, IntegrationError> {
        let api_key = self.api_key()?;
        let mut body = json!({ "prompt": request.prompt });
        if let Some(ratio) = &request.aspect_ratio {
            body["aspect_ratio"] = json!(ratio);
        }

        let response = self
            .client
            .post(self.url("/v1/ai/mystic"))
            .header("x-freepik-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let envelope: TaskEnvelope = parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Fetch the current status of a task.
    ///
    /// `GET /v1/ai/mystic/{task_id}`
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatus, IntegrationError> {
        let api_key = self.api_key()?;
        let response = self
            .client
            .get(self.url(&format!("/v1/ai/mystic/{task_id}")))
            .header("x-freepik-api-key", api_key)
            .send()
            .await?;
        let envelope: TaskEnvelope = parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Submit a task and poll it to completion under the configured policy.
    pub async fn generate(&self, request: &DesignRequest) -> Result<DesignOutcome, IntegrationError> {
        let submitted = self.submit(request).await?;
        tracing::info!(task_id = %submitted.task_id, "Freepik task submitted");

        if let Some(outcome) = terminal_outcome(&submitted) {
            return Ok(outcome);
        }
        let task_id = submitted.task_id;
        poll_until_done(self.config.poll, || self.task_status(&task_id)).await
    }
}

/// Map a task snapshot to an outcome if it is in a terminal state.
fn terminal_outcome(task: &TaskStatus) -> Option<DesignOutcome> {
    match task.status.as_str() {
        STATUS_COMPLETED => Some(DesignOutcome::Completed {
            task_id: task.task_id.clone(),
            images: task.generated.clone(),
        }),
        STATUS_FAILED => Some(DesignOutcome::Failed {
            task_id: task.task_id.clone(),
            status: task.status.clone(),
        }),
        _ => None,
    }
}

/// Call `fetch` every `policy.interval` until it reports a terminal state.
///
/// Fails with [`IntegrationError::Timeout`] after `policy.max_attempts`
/// non-terminal snapshots. Fetch errors abort immediately.
pub async fn poll_until_done<F, Fut>(
    policy: PollPolicy,
    mut fetch: F,
) -> Result<DesignOutcome, IntegrationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<TaskStatus, IntegrationError>>,
{
    for attempt in 1..=policy.max_attempts {
        tokio::time::sleep(policy.interval).await;
        let task = fetch().await?;
        tracing::debug!(task_id = %task.task_id, status = %task.status, attempt, "Polled Freepik task");
        if let Some(outcome) = terminal_outcome(&task) {
            return Ok(outcome);
        }
    }
    Err(IntegrationError::Timeout {
        attempts: policy.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::cell::Cell;

    fn task(status: &str, generated: &[&str]) -> TaskStatus {
        TaskStatus {
            task_id: "t-1".to_string(),
            status: status.to_string(),
            generated: generated.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fast(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn completes_after_in_progress_snapshots() {
        let calls = Cell::new(0u32);
        let outcome = poll_until_done(fast(5), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                Ok(if n < 3 {
                    task("IN_PROGRESS", &[])
                } else {
                    task("COMPLETED", &["https://img/1.png"])
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.get(), 3);
        assert_eq!(
            outcome,
            DesignOutcome::Completed {
                task_id: "t-1".to_string(),
                images: vec!["https://img/1.png".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn stops_after_max_attempts() {
        let calls = Cell::new(0u32);
        let result = poll_until_done(fast(4), || {
            calls.set(calls.get() + 1);
            async { Ok(task("IN_PROGRESS", &[])) }
        })
        .await;

        assert_matches!(result, Err(IntegrationError::Timeout { attempts: 4 }));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn failed_task_is_an_outcome_not_an_error() {
        let outcome = poll_until_done(fast(3), || async { Ok(task("FAILED", &[])) })
            .await
            .unwrap();
        assert_matches!(outcome, DesignOutcome::Failed { status, .. } if status == "FAILED");
    }

    #[tokio::test]
    async fn fetch_error_aborts_polling() {
        let calls = Cell::new(0u32);
        let result = poll_until_done(fast(10), || {
            calls.set(calls.get() + 1);
            async {
                Err(IntegrationError::Api {
                    status: 404,
                    body: "task not found".to_string(),
                })
            }
        })
        .await;
        assert_matches!(result, Err(IntegrationError::Api { status: 404, .. }));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn envelope_parses_generated_urls() {
        let envelope: TaskEnvelope = serde_json::from_value(json!({
            "data": { "task_id": "abc", "status": "COMPLETED", "generated": ["u1", "u2"] }
        }))
        .unwrap();
        assert_eq!(envelope.data.generated.len(), 2);
        assert_matches!(terminal_outcome(&envelope.data), Some(DesignOutcome::Completed { .. }));
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let value = serde_json::to_value(DesignOutcome::Failed {
            task_id: "x".to_string(),
            status: "FAILED".to_string(),
        })
        .unwrap();
        assert_eq!(value["outcome"], "failed");
        assert_eq!(value["task_id"], "x");
    }
}
