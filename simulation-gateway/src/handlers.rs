//! HTTP endpoints of the simulation gateway.

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use playground_simulator::{SimulationOutput, SimulationRequest, Simulator};
use playground_types::error::ApiError;
use playground_types::extract::ApiJson;
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub fn routes() -> Router<Arc<Simulator>> {
    Router::new()
        .route("/", get(get_index))
        .route("/simulate", get(get_simulate_info).post(post_simulate))
}

/// `GET /`: the single-page playground client.
#[instrument(skip_all)]
pub async fn get_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /simulate`: Returns a machine-readable description of the `/simulate` endpoint.
#[instrument(skip_all)]
pub async fn get_simulate_info() -> impl IntoResponse {
    Json(json!({
        "endpoint": "/simulate",
        "description": "POST Move source to compile it and simulate one entry function",
        "body": {
            "code": "string, contents of sources/main.move",
            "entry": "string, entry function name in module main",
            "args": "string[], passed as string arguments",
        }
    }))
}

/// `POST /simulate`: compile and simulate in a throwaway workspace.
///
/// Responds with `{ "output": <stdout> }`, or `{ "error": <stderr> }` with 400 for
/// missing input and 500 for toolchain failures.
#[instrument(skip_all)]
pub async fn post_simulate(
    State(simulator): State<Arc<Simulator>>,
    ApiJson(body): ApiJson<SimulationRequest>,
) -> Result<Json<SimulationOutput>, ApiError> {
    let output = simulator.simulate(body).await.inspect_err(|error| {
        tracing::warn!(%error, "Simulation failed");
    })?;
    Ok(Json(output))
}
