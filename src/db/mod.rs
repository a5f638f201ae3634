//! Persistence gateway for interaction records.
//!
//! Only this module talks to Postgres. Handlers go through [`PromptStore`]
//! so tests can swap in an in-memory or failing store.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;

pub mod prompt;
pub mod store;
#[cfg(test)]
pub mod mock;

pub use store::{PgPromptStore, PromptStore};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Could not save the interaction")]
    Insert(#[source] sqlx::Error),
    #[error("Could not load interaction history")]
    Fetch(#[source] sqlx::Error),
    #[error("Could not prepare the database schema")]
    Migrate(#[from] MigrateError),
}

/// Creates the `prompts` table and its index when absent. Safe to run repeatedly.
#[tracing::instrument(name = "Initialize schema.", skip(pool))]
pub async fn init_schema(pool: &PgPool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await.map_err(|err| {
        tracing::error!("Failed to run migrations: {:?}", err);
        StorageError::from(err)
    })
}
