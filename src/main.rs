use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use medscan::{config::Config, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    tokio::fs::create_dir_all(&config.upload_path).await?;

    if config.drug_lookup_enabled {
        info!("Drug lookup enabled against {}", config.drug_lookup_base_url);
    } else {
        info!("Drug lookup disabled; scans will return extracted fields only");
    }

    let state = Arc::new(AppState::new(config.clone()));

    let app = Router::new()
        .route("/api/health", get(medscan::health_check))
        .nest("/api/scan", medscan::routes::scan::router())
        .merge(medscan::swagger::create_swagger_router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
