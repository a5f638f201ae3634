//! Text generation behind one capability with two variants: the OpenAI
//! client and the placeholder used when no API key is configured.

use crate::configuration::GeneratorSettings;
use crate::connectors::GenerationError;
use crate::models::DualResponse;
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
pub mod mock;
pub mod openai;
pub mod placeholder;
mod prompts;

pub use openai::OpenAiGenerator;
pub use placeholder::PlaceholderGenerator;
pub use prompts::Tone;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Produces the casual and formal explanation of `topic`. Either both
    /// succeed or the call fails; partial results are never returned.
    async fn generate(&self, topic: &str) -> Result<DualResponse, GenerationError>;
}

/// Picks the generator variant once, from configuration.
pub fn init(settings: &GeneratorSettings) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    let generator: Arc<dyn TextGenerator> = if settings.has_api_key() {
        tracing::info!(
            endpoint = %settings.endpoint,
            model = %settings.model,
            "Initializing OpenAI text generator"
        );
        Arc::new(OpenAiGenerator::new(settings)?)
    } else {
        tracing::warn!("No OpenAI API key configured - serving placeholder responses");
        Arc::new(PlaceholderGenerator)
    };

    Ok(generator)
}
