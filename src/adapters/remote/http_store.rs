//! JSON-over-HTTP implementation of the RemoteStore.
//!
//! ```text
//! GET  {base}/progress/{identity_id}   -> LeaderboardEntry | 404
//! PUT  {base}/progress/{identity_id}   <- LeaderboardEntry
//! GET  {base}/leaderboard?limit=N      -> [LeaderboardEntry]
//! ```
//!
//! Connection errors, 429 and 5xx responses are retried with exponential
//! backoff until `max_retry_elapsed_ms` has passed. Other statuses fail
//! immediately.

use std::time::Duration;

use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoffBuilder;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Identity, LeaderboardEntry, PersistedProgress, RemoteConfig};
use crate::domain::ports::RemoteStore;

const INITIAL_RETRY_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    http: Client,
    base_url: String,
    api_token: Option<String>,
    max_retry_elapsed: Duration,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cognate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            max_retry_elapsed: Duration::from_millis(5_000),
        })
    }

    pub fn from_config(config: &RemoteConfig) -> anyhow::Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("remote.base_url is not set"))?;
        Ok(Self::new(base_url, config.api_token.clone(), Duration::from_secs(config.timeout_secs))?
            .with_max_retry_elapsed(Duration::from_millis(config.max_retry_elapsed_ms)))
    }

    pub fn with_max_retry_elapsed(mut self, elapsed: Duration) -> Self {
        self.max_retry_elapsed = elapsed;
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request built by `build`, retrying transient failures.
    async fn send<F>(&self, operation: &'static str, build: F) -> DomainResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(INITIAL_RETRY_INTERVAL)
            .with_max_elapsed_time(Some(self.max_retry_elapsed))
            .build();

        let build = &build;
        retry(policy, move || async move {
            let response = build().send().await.map_err(|e| {
                tracing::debug!(operation, error = %e, "remote request failed, retrying");
                backoff::Error::transient(DomainError::RemoteUnavailable(format!("{operation}: {e}")))
            })?;

            let status = response.status();
            if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                tracing::debug!(operation, %status, "remote returned retryable status");
                return Err(backoff::Error::transient(DomainError::RemoteFailure(format!(
                    "{operation} returned {status}"
                ))));
            }
            Ok(response)
        })
        .await
    }

    async fn error_for_status(operation: &str, response: Response) -> DomainError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        DomainError::RemoteFailure(format!("{operation} returned {status}: {body}"))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn fetch_progress(&self, identity_id: &str) -> DomainResult<Option<PersistedProgress>> {
        let path = format!("/progress/{identity_id}");
        let response = self.send("fetch_progress", || self.request(Method::GET, &path)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_for_status("fetch_progress", response).await);
        }

        let entry: LeaderboardEntry = response
            .json()
            .await
            .map_err(|e| DomainError::SerializationError(format!("fetch_progress: {e}")))?;
        Ok(Some(entry.to_progress()))
    }

    async fn upsert_progress(&self, identity: &Identity, progress: &PersistedProgress) -> DomainResult<()> {
        let path = format!("/progress/{}", identity.id);
        let entry = LeaderboardEntry::from_progress(identity, progress);
        let response = self
            .send("upsert_progress", || self.request(Method::PUT, &path).json(&entry))
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status("upsert_progress", response).await);
        }
        tracing::info!(identity = %identity.id, highest = entry.highest_level, best = entry.best_score, "remote progress updated");
        Ok(())
    }

    async fn leaderboard(&self, limit: usize) -> DomainResult<Vec<LeaderboardEntry>> {
        let path = format!("/leaderboard?limit={limit}");
        let response = self.send("leaderboard", || self.request(Method::GET, &path)).await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status("leaderboard", response).await);
        }
        response
            .json()
            .await
            .map_err(|e| DomainError::SerializationError(format!("leaderboard: {e}")))
    }
}
