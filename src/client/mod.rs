//! HTTP client for the service plus plain-text rendering of its answers.

use crate::models::{DualResponse, Prompt};
use serde::Serialize;
use std::time::Duration;

mod render;

pub use render::{render_history, render_responses, truncate};

/// Identity used until real authentication exists.
pub const MOCK_USER_ID: &str = "ai_intern_user_123";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Please enter a query.")]
    EmptyQuery,
    #[error("Could not connect to backend: {0}")]
    Connection(String),
    #[error("Backend did not answer within {0} seconds")]
    Timeout(u64),
    #[error("Backend responded with {status}: {detail}")]
    Backend { status: u16, detail: String },
    #[error("Unexpected response from backend: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct GeneratePayload<'a> {
    user_id: &'a str,
    query: &'a str,
}

pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    generate_timeout: Duration,
    history_timeout: Duration,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        generate_timeout: Duration,
        history_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|err| ClientError::Connection(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            generate_timeout,
            history_timeout,
        })
    }

    pub async fn generate(&self, user_id: &str, query: &str) -> Result<DualResponse, ClientError> {
        if query.trim().is_empty() {
            return Err(ClientError::EmptyQuery);
        }

        let response = self
            .http_client
            .post(format!("{}/generate", self.base_url))
            .timeout(self.generate_timeout)
            .json(&GeneratePayload { user_id, query })
            .send()
            .await
            .map_err(|err| Self::map_error(err, self.generate_timeout))?;

        Self::decode(response, self.generate_timeout).await
    }

    pub async fn history(&self, user_id: &str) -> Result<Vec<Prompt>, ClientError> {
        let response = self
            .http_client
            .get(format!("{}/history", self.base_url))
            .query(&[("user_id", user_id)])
            .timeout(self.history_timeout)
            .send()
            .await
            .map_err(|err| Self::map_error(err, self.history_timeout))?;

        Self::decode(response, self.history_timeout).await
    }

    fn map_error(err: reqwest::Error, timeout: Duration) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(timeout.as_secs())
        } else {
            ClientError::Connection(err.to_string())
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|json| json["detail"].as_str().map(str::to_string))
                .unwrap_or(text);
            return Err(ClientError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<T>().await.map_err(|err| {
            if err.is_timeout() {
                ClientError::Timeout(timeout.as_secs())
            } else {
                ClientError::Decode(err.to_string())
            }
        })
    }
}
