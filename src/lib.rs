pub mod browse;
pub mod config;
pub mod context;
pub mod database;
pub mod export;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod repositories;
pub mod requests;
pub mod schema;
pub mod yandex;
