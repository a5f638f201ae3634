use crate::db::PromptStore;
use crate::errors::ApiError;
use crate::forms;
use crate::models::Prompt;
use actix_web::{get, web};
use std::sync::Arc;

/// GET /history?user_id={id}
/// Returns every stored interaction of the user, most recent first.
#[tracing::instrument(name = "Get history.", skip(query, store), fields(user_id = %query.user_id))]
#[get("/history")]
pub async fn history_handler(
    query: web::Query<forms::HistoryQuery>,
    store: web::Data<Arc<dyn PromptStore>>,
) -> Result<web::Json<Vec<Prompt>>, ApiError> {
    let query = query.into_inner().validated()?;

    let items = store.list_by_user(&query.user_id).await.map_err(|err| {
        tracing::error!("Failed to load history: {:?}", err);
        err
    })?;

    tracing::debug!("Found {} interactions", items.len());
    Ok(web::Json(items))
}
