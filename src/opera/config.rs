//! Environment-variable configuration, grounded on
//! `examples/original_source/cmd/main.go`'s `godotenv.Load` + `os.Getenv`
//! sequence.

use std::time::Duration;

use crate::opera::error::OperaError;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub trace_addr: String,
    pub debug_logger: bool,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Config {
    /// Load `config/.env` (if present) then read the five environment
    /// variables the original contract names. `ADDR`/`TRACE_ADDR` fall back
    /// to the original's defaults when absent; `READ_TIMEOUT`/
    /// `WRITE_TIMEOUT` have no default and are a hard configuration error
    /// when missing or unparseable, matching the original.
    pub fn from_env() -> Result<Self, OperaError> {
        let _ = dotenv::from_filename("config/.env");

        let addr = std::env::var("ADDR").unwrap_or_else(|_| ":8080".to_string());
        let trace_addr = std::env::var("TRACE_ADDR").unwrap_or_else(|_| "tracing:4318".to_string());
        let debug_logger = std::env::var("DEBUG_LOGGER")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let read_timeout = parse_duration_env("READ_TIMEOUT")?;
        let write_timeout = parse_duration_env("WRITE_TIMEOUT")?;

        Ok(Config {
            addr,
            trace_addr,
            debug_logger,
            read_timeout,
            write_timeout,
        })
    }
}

fn parse_duration_env(name: &str) -> Result<Duration, OperaError> {
    let raw = std::env::var(name)
        .map_err(|_| OperaError::Internal(format!("{} is not set", name)))?;
    parse_go_duration(&raw)
        .ok_or_else(|| OperaError::Internal(format!("{} is not a valid duration: {}", name, raw)))
}

/// Parse a Go-style duration literal (`"5s"`, `"500ms"`, `"2m"`). Only the
/// units Opera's configuration actually uses are supported.
fn parse_go_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split_at = raw.find(|c: char| !c.is_ascii_digit() && c != '.')?;
    let (value, unit) = raw.split_at(split_at);
    let value: f64 = value.parse().ok()?;
    let millis = match unit {
        "ms" => value,
        "s" => value * 1_000.0,
        "m" => value * 60_000.0,
        "h" => value * 3_600_000.0,
        _ => return None,
    };
    Some(Duration::from_millis(millis as u64))
}
