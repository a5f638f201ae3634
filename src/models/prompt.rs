use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored interaction: a query and both generated explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prompt {
    pub id: Uuid,
    pub user_id: String,
    pub query: String,
    pub casual_response: String,
    pub formal_response: String,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    pub fn responses(&self) -> DualResponse {
        DualResponse {
            casual_response: self.casual_response.clone(),
            formal_response: self.formal_response.clone(),
        }
    }
}

/// Fields supplied by the caller; id and timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub user_id: String,
    pub query: String,
    pub casual_response: String,
    pub formal_response: String,
}

impl NewPrompt {
    pub fn new(user_id: String, query: String, responses: DualResponse) -> Self {
        Self {
            user_id,
            query,
            casual_response: responses.casual_response,
            formal_response: responses.formal_response,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualResponse {
    pub casual_response: String,
    pub formal_response: String,
}
