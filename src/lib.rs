pub mod config;
pub mod errors;
pub mod extractor;
pub mod file_service;
pub mod models;
pub mod ocr;
pub mod routes;
pub mod services;
pub mod swagger;

use axum::{http::StatusCode, Json};
use config::Config;
use services::drug_lookup::DrugLookupClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub drug_lookup: Option<DrugLookupClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let drug_lookup = if config.drug_lookup_enabled {
            Some(DrugLookupClient::new(&config))
        } else {
            None
        };
        Self { config, drug_lookup }
    }
}

/// Health check endpoint for monitoring
pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({"status": "ok"})))
}
