// ABOUTME: HTTP health probes against deployed workers.
// ABOUTME: Probes are time-bounded and report absence of health, never errors.

use serde::Deserialize;
use std::time::Duration;

/// The health endpoint's response shape. Only `version` is consumed.
#[derive(Debug, Deserialize)]
struct HealthBody {
    #[serde(default)]
    version: Option<String>,
}

/// GET `{url}/api/health` and extract the reported version.
///
/// Returns None on any failure: timeout, connection error, non-2xx status,
/// or a body without a version field. Never propagates an error — callers
/// decide whether "unhealthy" is fatal.
pub async fn check_health(url: &str, timeout: Duration) -> Option<String> {
    let client = reqwest::Client::builder().timeout(timeout).build().ok()?;

    let response = client
        .get(format!("{url}/api/health"))
        .send()
        .await
        .ok()?;

    if !response.status().is_success() {
        return None;
    }

    let body: HealthBody = response.json().await.ok()?;
    body.version.filter(|v| !v.is_empty())
}

/// GET the root path; returns the body size in bytes on a 2xx response.
pub async fn check_index(url: &str, timeout: Duration) -> Result<usize, String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| e.to_string())?;

    let response = client
        .get(format!("{url}/"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }

    let body = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(body.len())
}
