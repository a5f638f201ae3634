use super::{TextGenerator, Tone};
use crate::configuration::GeneratorSettings;
use crate::connectors::GenerationError;
use crate::models::DualResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::Instrument;

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiGenerator {
    endpoint: String,
    api_key: String,
    model: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(settings: &GeneratorSettings) -> Result<Self, GenerationError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|err| {
                GenerationError::Unavailable(format!("Failed to build HTTP client: {}", err))
            })?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.trim().to_string(),
            model: settings.model.clone(),
            http_client,
        })
    }

    async fn complete(&self, tone: Tone, topic: &str) -> Result<String, GenerationError> {
        let prompt = tone.prompt(topic);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: tone.max_tokens(),
            temperature: tone.temperature(),
        };

        let span = tracing::info_span!("Requesting completion", tone = %tone, model = %self.model);
        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(tone = %tone, "Provider responded with HTTP {}", status);
            return Err(GenerationError::from_status(status.as_u16(), &text));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::InvalidResponse(err.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                GenerationError::InvalidResponse("response contained no completion".to_string())
            })?;

        let content = content.trim();
        if content.is_empty() {
            return Err(GenerationError::EmptyCompletion(tone));
        }

        Ok(content.to_string())
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, topic: &str) -> Result<DualResponse, GenerationError> {
        let (casual_response, formal_response) = futures::try_join!(
            self.complete(Tone::Casual, topic),
            self.complete(Tone::Formal, topic)
        )?;

        Ok(DualResponse {
            casual_response,
            formal_response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETIONS_PATH: &str = "/v1/chat/completions";

    fn settings(server: &MockServer, timeout_secs: u64) -> GeneratorSettings {
        GeneratorSettings {
            api_key: "test-key".to_string(),
            endpoint: format!("{}{}", server.uri(), COMPLETIONS_PATH),
            model: "gpt-test".to_string(),
            timeout_secs,
        }
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    async fn mount_tone(server: &MockServer, marker: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", "Bearer test-key"))
            .and(body_string_contains(marker))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn returns_both_completions_trimmed() {
        let server = MockServer::start().await;
        mount_tone(
            &server,
            "social media commentator",
            ResponseTemplate::new(200).set_body_json(completion("  Stars are cosmic vacuum cleaners!\n")),
        )
        .await;
        mount_tone(
            &server,
            "academic researcher",
            ResponseTemplate::new(200).set_body_json(completion("1. Definition: A black hole is...")),
        )
        .await;

        let generator = OpenAiGenerator::new(&settings(&server, 5)).unwrap();
        let responses = generator.generate("black holes").await.unwrap();

        assert_eq!(responses.casual_response, "Stars are cosmic vacuum cleaners!");
        assert_eq!(responses.formal_response, "1. Definition: A black hole is...");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests {
            let body: serde_json::Value = request.body_json().unwrap();
            assert_eq!(body["model"], "gpt-test");
            assert!(body["messages"][0]["content"]
                .as_str()
                .unwrap()
                .contains("\"black holes\""));
        }
    }

    #[tokio::test]
    async fn unauthorized_is_reported_as_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(&settings(&server, 5)).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        match err {
            GenerationError::Provider { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn one_failing_tone_fails_the_whole_generation() {
        let server = MockServer::start().await;
        mount_tone(
            &server,
            "social media commentator",
            ResponseTemplate::new(200).set_body_json(completion("Fun fact!")),
        )
        .await;
        mount_tone(
            &server,
            "academic researcher",
            ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "Rate limit reached" }
            })),
        )
        .await;

        let generator = OpenAiGenerator::new(&settings(&server, 5)).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        assert!(matches!(err, GenerationError::Provider { status: 429, .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(&settings(&server, 5)).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn missing_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(&settings(&server, 5)).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn blank_completion_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(&settings(&server, 5)).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        assert!(matches!(err, GenerationError::EmptyCompletion(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let generator = OpenAiGenerator::new(&settings(&server, 1)).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        assert!(matches!(err, GenerationError::Timeout(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        let settings = GeneratorSettings {
            api_key: "test-key".to_string(),
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "gpt-test".to_string(),
            timeout_secs: 2,
        };

        let generator = OpenAiGenerator::new(&settings).unwrap();
        let err = generator.generate("tides").await.unwrap_err();

        assert!(matches!(
            err,
            GenerationError::Unavailable(_) | GenerationError::Timeout(_)
        ));
    }
}
