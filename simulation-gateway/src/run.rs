//! Simulation gateway server startup.

use axum::Router;
use axum::http::Method;
use dotenvy::dotenv;
use playground_types::util::{SigDown, Telemetry};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;

use crate::config::Config;
use crate::handlers;

/// Starts the simulation gateway.
///
/// - Loads `.env` variables.
/// - Initializes tracing, and OpenTelemetry export when `OTEL_*` is set.
/// - Prepares the workspace root and the Aptos CLI runner.
/// - Serves `/simulate` and the playground page until SIGTERM or SIGINT.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let config = Config::load()?;
    tokio::fs::create_dir_all(config.workspace_root())
        .await
        .inspect_err(|e| {
            tracing::error!(
                "Failed to create workspace root {}: {}",
                config.workspace_root().display(),
                e
            )
        })?;

    let runner = config.runner();
    tracing::info!(
        aptos_cli = %runner.program().display(),
        workspace_root = %config.workspace_root().display(),
        timeout = ?config.timeout(),
        "Using Aptos CLI"
    );
    let simulator = config.simulator(Arc::new(runner));
    let axum_state = Arc::new(simulator);

    let http_endpoints = Router::new()
        .merge(handlers::routes().with_state(axum_state))
        .layer(telemetry.http_tracing())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        );

    let addr = SocketAddr::new(config.host(), config.port());
    tracing::info!("Starting simulation gateway at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", addr, e))?;

    let sig_down = SigDown::try_new()?;
    let axum_cancellation_token = sig_down.cancellation_token();
    let axum_graceful_shutdown = async move { axum_cancellation_token.cancelled().await };
    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(axum_graceful_shutdown)
        .await?;

    Ok(())
}
