//! Simulation gateway HTTP entrypoint.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `HOST`, `PORT` control the binding address (default `0.0.0.0:3001`)
//! - `APTOS_CLI`, `APTOS_PROFILE`, `SIMULATION_MODULE_ADDRESS` configure the toolchain
//! - `SIMULATION_TIMEOUT_SECS` bounds each toolchain step
//! - `PLAYGROUND_WORKSPACE_ROOT`, `MOVE_MANIFEST_TEMPLATE` control scratch packages
//! - `OTEL_*` variables enable trace and metric export

use std::process;

#[tokio::main]
async fn main() {
    let result = simulation_gateway::run().await;
    if let Err(e) = result {
        println!("{e}");
        process::exit(1)
    }
}
