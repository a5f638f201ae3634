use crate::db::{self, StorageError};
use crate::models::{NewPrompt, Prompt};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Persists a fully generated interaction and returns the stored row.
    async fn create(&self, prompt: NewPrompt) -> Result<Prompt, StorageError>;

    /// All interactions of `user_id`, most recent first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Prompt>, StorageError>;
}

pub struct PgPromptStore {
    pool: PgPool,
}

impl PgPromptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn create(&self, prompt: NewPrompt) -> Result<Prompt, StorageError> {
        db::prompt::insert(&self.pool, prompt).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Prompt>, StorageError> {
        db::prompt::fetch_by_user(&self.pool, user_id).await
    }
}
