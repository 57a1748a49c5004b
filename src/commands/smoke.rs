// ABOUTME: Smoke test command implementation.
// ABOUTME: Health + index probes against a deployed URL, with optional project checks.

use std::process::Stdio;
use tokio::process::Command;

use crate::config::Config;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::health;
use crate::manifest::ManifestStore;
use crate::output::Output;

/// The resolved smoke target: a URL and, when it came from the manifest,
/// the version that URL is expected to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeTarget {
    pub url: String,
    pub expected_version: Option<String>,
}

/// Run the smoke test against an explicit URL, the manifest's latest
/// release, or the configured production URL, in that priority order.
pub async fn smoke(config: &Config, url_arg: Option<&str>, output: &Output) -> Result<()> {
    let target = resolve_target(config, url_arg).ok_or(Error::NoSmokeTarget)?;
    let url = &target.url;
    let mut diag = Diagnostics::default();

    output.progress(&format!("Smoke testing: {url}\n"));

    let health_version = health::check_health(url, config.smoke_timeout)
        .await
        .ok_or_else(|| Error::HealthUnreachable { url: url.clone() })?;
    output.progress(&format!("  health:    OK (v{health_version})"));

    let size = health::check_index(url, config.smoke_timeout)
        .await
        .map_err(|reason| Error::IndexUnreachable {
            url: url.clone(),
            reason,
        })?;
    output.progress(&format!("  index:     OK ({size} bytes)"));

    if let Some(extra) = &config.smoke_extra {
        run_extra_checks(extra, url).await?;
    }

    match &target.expected_version {
        Some(expected) if *expected != health_version => {
            // Eventual consistency after an upload: drift warns, never fails.
            diag.warn(Warning::version_drift(format!(
                "version mismatch — expected v{expected}, got v{health_version}"
            )));
            for warning in diag.warnings() {
                output.warning(&warning.message);
            }
        }
        Some(expected) => {
            output.success(&format!("PASS: All checks passed (v{expected})"));
        }
        None => {
            output.success(&format!("PASS: All checks passed (v{health_version})"));
        }
    }

    Ok(())
}

/// Explicit arg → latest manifest release → configured production URL.
fn resolve_target(config: &Config, url_arg: Option<&str>) -> Option<SmokeTarget> {
    if let Some(url) = url_arg {
        return Some(SmokeTarget {
            url: url.to_string(),
            expected_version: None,
        });
    }

    if let Some(manifest) = ManifestStore::from_config(config).try_load()
        && let Some(latest) = manifest.versions.first()
        && !latest.url.is_empty()
    {
        return Some(SmokeTarget {
            url: latest.url.clone(),
            expected_version: Some(latest.version.clone()),
        });
    }

    if !config.production_url.is_empty() {
        return Some(SmokeTarget {
            url: config.production_url.clone(),
            expected_version: None,
        });
    }

    None
}

/// Run the configured project-specific check with the target URL injected
/// as SMOKE_URL. A non-zero exit fails the smoke test.
async fn run_extra_checks(command: &str, url: &str) -> Result<()> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .env("SMOKE_URL", url)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        return Err(Error::SmokeExtraFailed);
    }
    Ok(())
}
