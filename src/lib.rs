pub mod client;
pub mod configuration;
pub mod connectors;
pub mod db;
pub mod errors;
pub mod forms;
pub mod models;
pub mod routes;
pub mod startup;
pub mod telemetry;
