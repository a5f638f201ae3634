use super::{PromptStore, StorageError};
use crate::models::{NewPrompt, Prompt};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

/// Keeps rows in memory, newest first.
#[derive(Default)]
pub struct InMemoryPromptStore {
    rows: Mutex<Vec<Prompt>>,
}

impl InMemoryPromptStore {
    pub fn rows(&self) -> Vec<Prompt> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn create(&self, prompt: NewPrompt) -> Result<Prompt, StorageError> {
        let saved = Prompt {
            id: Uuid::new_v4(),
            user_id: prompt.user_id,
            query: prompt.query,
            casual_response: prompt.casual_response,
            formal_response: prompt.formal_response,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(0, saved.clone());
        Ok(saved)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Prompt>, StorageError> {
        let mut rows: Vec<Prompt> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// Fails every call as if the connection were gone.
pub struct FailingPromptStore;

#[async_trait]
impl PromptStore for FailingPromptStore {
    async fn create(&self, _prompt: NewPrompt) -> Result<Prompt, StorageError> {
        Err(StorageError::Insert(sqlx::Error::PoolTimedOut))
    }

    async fn list_by_user(&self, _user_id: &str) -> Result<Vec<Prompt>, StorageError> {
        Err(StorageError::Fetch(sqlx::Error::PoolTimedOut))
    }
}
