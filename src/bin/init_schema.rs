//! Creates the `prompts` table. Run once per deployment, before `server`.

use dualtone::configuration::get_configuration;
use dualtone::db;
use dualtone::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("dualtone-init-schema".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout_secs))
        .connect(&settings.database.connection_string())
        .await?;

    db::init_schema(&pg_pool).await?;
    tracing::info!("Database schema is up to date");

    Ok(())
}
