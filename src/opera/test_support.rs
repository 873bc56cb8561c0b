//! Test-only helpers shared across unit tests: a minimal HTTP server
//! standing in for a tool service or a container's `/config` endpoint.

#![cfg(test)]

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

/// Start a server that answers every `POST /` with `body` and 200 OK.
/// Returns the bound address; the server task is detached and lives for the
/// remainder of the test process.
pub async fn spawn_tool_server(body: &'static str) -> SocketAddr {
    let app = Router::new().route("/", post(move || async move { body }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a server that answers every `POST /` with `status` and an empty
/// body, for exercising transport-error paths.
pub async fn spawn_failing_tool_server(status: StatusCode) -> SocketAddr {
    let app = Router::new().route("/", post(move || async move { status }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a server answering `GET /config` with a canned tool config body.
pub async fn spawn_config_server(config_json: &'static str) -> SocketAddr {
    let app = Router::new().route("/config", get(move || async move { config_json }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
