// src/bin/api_server.rs

use proverb_store::infra::{config::AppConfig, telemetry};
use proverb_store::transport;
use proverb_store::RecordStore;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let config = AppConfig::from_env()?;

    // --- Store Initialization ---
    let store = RecordStore::open(&config.proverbs_path, config.failure_policy)?;
    match store.load() {
        Ok(records) => info!(records = records.len(), "store ready"),
        // Not fatal: the file may be fixed while the server runs.
        Err(e) => error!(error = %e, "store is not readable at startup"),
    }
    let app_state = transport::http::AppState::new(store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
