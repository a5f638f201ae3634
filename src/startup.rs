use crate::connectors::TextGenerator;
use crate::db::PromptStore;
use crate::errors::ApiError;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// Largest accepted JSON body.
const JSON_LIMIT: usize = 64 * 1024;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn PromptStore>,
    generator: Arc<dyn TextGenerator>,
) -> Result<Server, std::io::Error> {
    let store = web::Data::new(store);
    let generator = web::Data::new(generator);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .app_data(generator.clone())
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Routes and extractor settings, shared by the server and route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            tracing::warn!("Rejected request body: {}", err);
            ApiError::Validation(format!("Invalid request body: {}", err)).into()
        });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        tracing::warn!("Rejected query string: {}", err);
        ApiError::Validation(format!("Invalid query string: {}", err)).into()
    });

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(routes::health_check)
        .service(routes::generate_handler)
        .service(routes::history_handler);
}
