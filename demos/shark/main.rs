//! Mock `get_shark_warning` tool service, grounded on
//! `examples/original_source/.devcontainer/mock/shark/main.go`.
//! Implements the tool service contract (`GET /config`, `POST /`) with a
//! canned response; not part of the library crate. The original's
//! OpenTelemetry span wiring and artificial sleep are not reproduced — out
//! of this expansion's ambient scope.

use axum::extract::Json as JsonExtract;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct LocationRequest {
    location: String,
}

async fn config() -> Json<serde_json::Value> {
    Json(json!({
        "name": "get_shark_warning",
        "description": "Get current shark warning level for the location",
        "properties": {"location": {"type": "string"}},
        "required": ["location"],
    }))
}

async fn call(JsonExtract(req): JsonExtract<LocationRequest>) -> String {
    format!("many sharks and high danger for {}", req.location)
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let addr = std::env::var("ADDR").unwrap_or_else(|_| ":8080".to_string());
    let bind_addr = if addr.starts_with(':') { format!("0.0.0.0{}", addr) } else { addr.clone() };
    let app = Router::new().route("/config", get(config)).route("/", post(call));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("bind address");
    log::info!("start mock shark warning tool on {}", addr);
    axum::serve(listener, app).await.expect("serve shark tool");
}
