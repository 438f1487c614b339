use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use evently_server::config::Config;
use evently_server::routes::create_routes;
use evently_server::services::generator_from_config;
use evently_server::state::AppState;
use evently_server::store::EventStore;

const DEFAULT_LOG_FILTER: &str = "evently_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();

    let store = if config.seed_fixtures {
        EventStore::seeded()
    } else {
        EventStore::new()
    };
    tracing::info!("Event store ready with {} event(s)", store.len());

    let generator =
        generator_from_config(&config.llm).expect("Failed to build description generator");
    let state = AppState::new(store, Arc::from(generator));

    let app: Router = create_routes(state, &config);

    let addr = config.socket_addr();
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
