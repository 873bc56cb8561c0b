//! Mock `get_weather` tool service, grounded on
//! `examples/original_source/.devcontainer/mock/weather/main.go`.
//! Implements the tool service contract (`GET /config`, `POST /`) with a
//! canned response; not part of the library crate.

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
        "name": "get_weather",
        "description": "Get weather at the given location",
        "properties": {"location": {"type": "string"}},
        "required": ["location"],
    }))
}

async fn call(JsonExtract(req): JsonExtract<LocationRequest>) -> String {
    format!("30 degree in {}", req.location)
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
    log::info!("start mock weather tool on {}", addr);
    axum::serve(listener, app).await.expect("serve weather tool");
}
