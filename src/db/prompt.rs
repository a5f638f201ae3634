use crate::db::StorageError;
use crate::models::{NewPrompt, Prompt};
use chrono::Utc;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

pub async fn insert(pool: &PgPool, prompt: NewPrompt) -> Result<Prompt, StorageError> {
    let query_span = tracing::info_span!("Saving new prompt into the database");
    async move {
        let mut tx = pool.begin().await.map_err(|err| {
            tracing::error!("Failed to open transaction: {:?}", err);
            StorageError::Insert(err)
        })?;

        let saved = sqlx::query_as::<_, Prompt>(
            r#"
            INSERT INTO prompts (id, user_id, query, casual_response, formal_response, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, query, casual_response, formal_response, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&prompt.user_id)
        .bind(&prompt.query)
        .bind(&prompt.casual_response)
        .bind(&prompt.formal_response)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            StorageError::Insert(err)
        })?;

        // an uncommitted transaction rolls back on drop
        tx.commit().await.map_err(|err| {
            tracing::error!("Failed to commit prompt: {:?}", err);
            StorageError::Insert(err)
        })?;

        tracing::info!("New prompt {} has been saved to database", saved.id);
        Ok::<Prompt, StorageError>(saved)
    }
    .instrument(query_span)
    .await
}

pub async fn fetch_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Prompt>, StorageError> {
    let query_span = tracing::info_span!("Fetch prompts by user id.");
    sqlx::query_as::<_, Prompt>(
        r#"
        SELECT id, user_id, query, casual_response, formal_response, created_at
        FROM prompts
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch prompts, error: {:?}", err);
        StorageError::Fetch(err)
    })
}

pub async fn count_by_user(pool: &PgPool, user_id: &str) -> Result<i64, StorageError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM prompts WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count prompts, error: {:?}", err);
            StorageError::Fetch(err)
        })
}
