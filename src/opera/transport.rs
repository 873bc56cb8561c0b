//! Shared HTTP transport: a pooled `reqwest::Client` wrapper applying a
//! per-call timeout and racing each request against cancellation.
//!
//! Grounded on the pooled-client settings in
//! `examples/CloudLLM-ai-cloudllm/src/cloudllm/http_client_pool.rs`
//! (connection reuse, keepalive, connect timeout), generalized here into a
//! per-instance client rather than a
//! global URL-keyed pool, since Opera only ever talks to two kinds of
//! remote peer (tool services, the container runtime's HTTP surface).

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::opera::error::OperaError;

#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    timeout: Duration,
}

impl Transport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::ClientBuilder::new()
            .pool_max_idle_per_host(100)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .connect_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET addr`, racing the request against `cancel`.
    pub async fn get(&self, addr: &str, cancel: &CancellationToken) -> Result<String, OperaError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(OperaError::Cancelled),
            result = self.client.get(addr).send() => {
                let resp = result.map_err(|e| OperaError::Transport(e.to_string()))?;
                Self::read_body(resp).await
            }
        }
    }

    /// `POST addr` with `Content-Type: application/json` and `body` as the
    /// raw request payload, racing against `cancel`.
    pub async fn post(
        &self,
        addr: &str,
        body: String,
        cancel: &CancellationToken,
    ) -> Result<String, OperaError> {
        tokio::select! {
            _ = cancel.cancelled() => Err(OperaError::Cancelled),
            result = self
                .client
                .post(addr)
                .header("Content-Type", "application/json")
                .body(body)
                .send() => {
                let resp = result.map_err(|e| OperaError::Transport(e.to_string()))?;
                Self::read_body(resp).await
            }
        }
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, OperaError> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| OperaError::Transport(e.to_string()))?;
        if status != reqwest::StatusCode::OK {
            return Err(OperaError::Transport(format!(
                "unexpected status {}: {}",
                status, text
            )));
        }
        Ok(text)
    }
}
