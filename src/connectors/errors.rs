use crate::connectors::generator::Tone;

/// Longest provider message carried into an error detail.
const MAX_MESSAGE_CHARS: usize = 200;

/// Errors that can occur while talking to the text-generation provider
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Provider did not answer within the configured timeout
    #[error("Provider request timed out: {0}")]
    Timeout(String),
    /// Provider unreachable or the request could not be sent
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
    /// Non-success status: bad key (401/403), rate limit (429), provider outage
    #[error("Provider rejected the request ({status}): {message}")]
    Provider { status: u16, message: String },
    /// Body did not match the chat-completion format
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
    /// Provider answered with an empty completion
    #[error("Provider returned an empty {0} response")]
    EmptyCompletion(Tone),
}

impl GenerationError {
    /// Builds a `Provider` error from a failed response body, preferring the
    /// `error.message` field of OpenAI-style payloads.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        let message = if message.is_empty() {
            "no details".to_string()
        } else if message.chars().count() > MAX_MESSAGE_CHARS {
            let mut short: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
            short.push_str("...");
            short
        } else {
            message
        };

        Self::Provider { status, message }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Provider {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
