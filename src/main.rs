use dualtone::configuration::get_configuration;
use dualtone::connectors;
use dualtone::db::{PgPromptStore, PromptStore};
use dualtone::startup::run;
use dualtone::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("dualtone".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");

    match settings.database.url {
        Some(_) => tracing::info!("Connecting to PostgreSQL using DATABASE_URL"),
        None => tracing::info!(
            db_host = %settings.database.host,
            db_port = settings.database.port,
            db_name = %settings.database.database_name,
            "Connecting to PostgreSQL"
        ),
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout_secs))
        .connect(&settings.database.connection_string())
        .await
        .expect("Failed to connect to database.");
    let store: Arc<dyn PromptStore> = Arc::new(PgPromptStore::new(pg_pool));

    let generator = connectors::init_generator(&settings.generator)
        .expect("Failed to initialize text generator.");

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address)?;

    run(listener, store, generator)?.await
}
