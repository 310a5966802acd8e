use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rideshare_server::config::ServerConfig;
use rideshare_server::oracle::DistanceMatrixClient;
use rideshare_server::planner::PlannerConfig;
use rideshare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|e| format!("configuration error: {e}"))?;

    let oracle = DistanceMatrixClient::new(config.oracle_config())
        .map_err(|e| format!("failed to create Distance Matrix client: {e}"))?;

    let state = AppState::new(oracle, PlannerConfig::default());
    let app = create_router(state, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {addr}: {e}"))?;

    info!(%addr, origins = ?config.cors_origins, "ride-share router listening");
    info!("  GET  /          - Greeting");
    info!("  GET  /health    - Health check");
    info!("  POST /get-data  - Plan routes");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}
