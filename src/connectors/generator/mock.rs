use super::TextGenerator;
use crate::connectors::GenerationError;
use crate::models::DualResponse;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Generator with a fixed outcome that counts how often it was called.
pub struct ScriptedGenerator {
    outcome: Option<DualResponse>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn succeeding(casual: &str, formal: &str) -> Self {
        Self {
            outcome: Some(DualResponse {
                casual_response: casual.to_string(),
                formal_response: formal.to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _topic: &str) -> Result<DualResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().ok_or_else(|| GenerationError::Provider {
            status: 503,
            message: "The provider is overloaded".to_string(),
        })
    }
}
