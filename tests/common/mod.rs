use dualtone::configuration::{get_configuration, DatabaseSettings, MOCK_API_KEY};
use dualtone::connectors;
use dualtone::db::{self, PgPromptStore, PromptStore};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

/// Starts the server on a random port against a fresh database, in
/// placeholder mode. Returns `None` when Postgres is not reachable.
pub async fn spawn_app() -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.url = None;
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();
    configuration.generator.api_key = MOCK_API_KEY.to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let store: Arc<dyn PromptStore> = Arc::new(PgPromptStore::new(connection_pool.clone()));
    let generator = connectors::init_generator(&configuration.generator)
        .expect("Failed to initialize generator");

    let server = dualtone::startup::run(listener, store, generator).expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, Box<dyn std::error::Error>> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;
    db::init_schema(&connection_pool).await?;

    Ok(connection_pool)
}
