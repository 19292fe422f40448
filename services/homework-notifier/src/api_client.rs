//! Client for the homework review API

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::HomeworkBotError;
use crate::io::HttpClient;

/// Source of homework review payloads
#[async_trait]
pub trait HomeworkApi: Send + Sync + std::fmt::Debug {
    /// Fetch every status change since `cursor` (seconds since the epoch)
    async fn fetch(&self, cursor: i64) -> crate::Result<Value>;
}

/// Homework API client authenticated with an OAuth token
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &ApiConfig, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);
        Self {
            endpoint: config.endpoint.clone(),
            token: token.to_string(),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, cursor: i64) -> crate::Result<Value> {
        let authorization = format!("OAuth {}", self.token);
        let from_date = cursor.to_string();
        let headers = [("Authorization", authorization.as_str())];
        let query = [("from_date", from_date.as_str())];

        tracing::debug!(
            "Requesting homework statuses: url={}, headers={{Authorization: OAuth ***}}, params={{from_date: {}}}",
            self.endpoint,
            from_date
        );

        let response = self
            .http
            .get(&self.endpoint, &headers, &query)
            .await
            .map_err(|e| match e {
                HomeworkBotError::Transport(msg) => HomeworkBotError::FetchFailed(msg),
                other => other,
            })?;

        if !response.is_success() {
            tracing::error!(
                "Homework API returned status {}: {}",
                response.status,
                response.reason
            );
            return Err(HomeworkBotError::HttpError {
                status: response.status,
                reason: response.reason,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| HomeworkBotError::MalformedPayload(e.to_string()))
    }
}
