use super::TextGenerator;
use crate::connectors::GenerationError;
use crate::models::DualResponse;
use async_trait::async_trait;

/// Fallback mode for environments without provider access. Never calls out
/// and always answers the same way for the same topic.
pub struct PlaceholderGenerator;

impl PlaceholderGenerator {
    pub fn responses(topic: &str) -> DualResponse {
        DualResponse {
            casual_response: format!("Mock Casual: You asked about {}. It's super fun!", topic),
            formal_response: format!(
                "Mock Formal: A detailed review of {} suggests careful consideration is warranted.",
                topic
            ),
        }
    }
}

#[async_trait]
impl TextGenerator for PlaceholderGenerator {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn generate(&self, topic: &str) -> Result<DualResponse, GenerationError> {
        tracing::debug!("Serving placeholder responses");
        Ok(Self::responses(topic))
    }
}
