//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use migration::{Migrator, MigratorTrait};
use quill_core::domain::MAX_IMAGE_BYTES;
use quill_core::ports::SessionGate;
use quill_infra::JwtSessionGate;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    // Storage is opened during an explicit startup phase and injected into
    // the state, so no request ever races a lazy first-use initialization.
    let db = quill_infra::connect(&config.database)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = AppState::new(db);
    let session_gate: Arc<dyn SessionGate> = Arc::new(JwtSessionGate::from_env());

    // Inline image payloads ride inside the JSON body, so the body limit
    // sits a little above the image bound.
    let json_config = web::JsonConfig::default().limit(MAX_IMAGE_BYTES + 64 * 1024);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(session_gate.clone()))
            .app_data(json_config.clone())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,quill_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
