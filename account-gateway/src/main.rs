//! Account gateway HTTP entrypoint.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `HOST`, `PORT` control the binding address (default `0.0.0.0:3000`)
//! - `APTOS_NETWORK`, `APTOS_NODE_URL`, `APTOS_FAUCET_URL` select the chain
//! - `MODULE_ADDRESS` names the account hosting the playground module (required)
//! - `OTEL_*` variables enable trace and metric export

use std::process;

#[tokio::main]
async fn main() {
    let result = account_gateway::run().await;
    if let Err(e) = result {
        println!("{e}");
        process::exit(1)
    }
}
