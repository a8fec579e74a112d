//! Event planning API server entry point.

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use eventplan_api::config::AppConfig;
use eventplan_api::error::AppError;
use eventplan_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting event planning API server");

    let config = AppConfig::from_env()?;
    let addr = config.socket_addr()?;
    tracing::info!(
        store = if config.database_url.is_some() { "postgres" } else { "memory" },
        seed_catalog = config.seed_catalog,
        max_connections = config.max_connections,
        "Loaded configuration"
    );
    let app_state = AppState::from_config(&config).await?;

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = eventplan_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
