use crate::connectors::TextGenerator;
use crate::db::PromptStore;
use crate::errors::ApiError;
use crate::forms;
use crate::models::{DualResponse, NewPrompt};
use actix_web::{post, web};
use std::sync::Arc;

/// POST /generate
/// Generates both explanations, stores the interaction and returns the texts.
/// Nothing is returned unless the row was committed.
#[tracing::instrument(
    name = "Generate responses.",
    skip(form, generator, store),
    fields(user_id = %form.user_id)
)]
#[post("/generate")]
pub async fn generate_handler(
    form: web::Json<forms::GenerateForm>,
    generator: web::Data<Arc<dyn TextGenerator>>,
    store: web::Data<Arc<dyn PromptStore>>,
) -> Result<web::Json<DualResponse>, ApiError> {
    let form = form.into_inner().validated().map_err(|err| {
        tracing::warn!("Invalid generate request: {}", err);
        err
    })?;

    let responses = generator.generate(&form.query).await.map_err(|err| {
        tracing::error!(generator = generator.name(), "Generation failed: {}", err);
        err
    })?;

    let prompt = store
        .create(NewPrompt::new(form.user_id, form.query, responses))
        .await
        .map_err(|err| {
            tracing::error!("Failed to store interaction: {:?}", err);
            err
        })?;

    tracing::info!("Interaction {} has been stored", prompt.id);
    Ok(web::Json(prompt.responses()))
}
