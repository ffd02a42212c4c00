// API Server Binary Entry Point
//
// Purpose: Start the Axum API server
// Usage: cargo run --bin lifeplants-server

use lifeplants::{AppState, Config, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "lifeplants=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = Config::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  DEFAULT_CITY: {}", config.default_city);
    tracing::info!("  DEFAULT_TEMPERATURE_C: {}", config.default_temperature_c);
    tracing::info!("  ADVICE_CALL_POLICY: {:?}", config.advice.call);
    tracing::info!("  ADVICE_FALLBACK: {:?}", config.advice.fallback);
    tracing::info!("  ADVICE_PERSONA: {:?}", config.advice.prompt.persona);
    tracing::info!("  ADVICE_TIMEOUT: {:?}", config.advice.timeout);
    tracing::info!("  MAX_CONCURRENT_ADVICE: {}", config.max_concurrent_advice);

    let state = AppState::new(&config)?;
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
