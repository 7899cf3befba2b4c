use banana_translate_web::{AppConfig, AppState, app};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    let orchestrator = config
        .build_orchestrator()
        .map_err(|e| format!("Failed to initialize translator: {}", e))?;
    info!("🍌 Starting banana-translate web server");
    info!(
        "Simulation: failure rate {}, confidence [{}, {})",
        config.simulation.failure_rate,
        config.simulation.confidence_min,
        config.simulation.confidence_max
    );

    let router = app(AppState::new(orchestrator));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("🚀 Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
