use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use busbar_sizing_toolbox::api::{self, AppState};
use busbar_sizing_toolbox::config;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "busbar_sizing_toolbox=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!("server stopped: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting busbar sizing service");

    let config_path = config::resolve_path(None);
    let cfg = config::load_or_default(&config_path)?;
    let catalog = cfg.catalog()?;
    tracing::info!(
        path = %config_path.display(),
        custom_catalog = cfg.catalog.is_some(),
        "configuration loaded"
    );

    let app = api::create_router(AppState::new(catalog, cfg.simulation.clone()));

    let addr = cfg.server.bind_address();
    tracing::info!("Listening on {}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/materials");
    tracing::info!("  GET  /api/voltage-levels");
    tracing::info!("  GET  /api/standard-configurations/:voltage");
    tracing::info!("  GET  /api/standard-sizes");
    tracing::info!("  POST /api/calculate");
    tracing::info!("  POST /api/simulate");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
