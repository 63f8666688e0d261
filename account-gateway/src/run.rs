//! Account gateway server startup.

use axum::Router;
use axum::http::Method;
use dotenvy::dotenv;
use playground_aptos::chain::AptosChainProvider;
use playground_types::util::{SigDown, Telemetry};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;

use crate::config::Config;
use crate::gateway::AccountGateway;
use crate::handlers;

/// Starts the account gateway.
///
/// - Loads `.env` variables.
/// - Initializes tracing, and OpenTelemetry export when `OTEL_*` is set.
/// - Connects to the configured Aptos fullnode and faucet.
/// - Serves the account and transaction endpoints until SIGTERM or SIGINT.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
        .expect("Failed to initialize rustls crypto provider");

    dotenv().ok();

    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let config = Config::load()?;
    let module_address = config.module_address()?;
    let provider = AptosChainProvider::from_config(config.aptos())?;
    tracing::info!(
        network = %config.aptos().network(),
        node_url = %config.aptos().node_url(),
        %module_address,
        "Using Aptos network"
    );

    let gateway = AccountGateway::new(Arc::new(provider), module_address);
    let axum_state = Arc::new(gateway);

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
    tracing::info!("Starting account gateway at http://{}", addr);

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
