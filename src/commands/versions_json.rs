// ABOUTME: Manifest generation command.
// ABOUTME: Queries the platform, merges prior metadata, optionally probes health, writes versions.json.

use chrono::Utc;
use std::path::PathBuf;

use crate::config::{Config, app_version, command_count};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::Result;
use crate::git;
use crate::manifest::{self, ManifestStore};
use crate::output::Output;
use crate::wrangler::{CommandRunner, Wrangler, fetch_versions};

/// Regenerate versions.json from the platform's version list.
///
/// The file is fully rewritten; only git/command metadata for non-current
/// releases is carried forward from the previous manifest on disk.
pub async fn versions_json<R: CommandRunner>(
    runner: &R,
    config: &Config,
    out: Option<PathBuf>,
    check_health: bool,
    output: &Output,
) -> Result<()> {
    let wrangler = Wrangler::new(runner, config);
    let records = fetch_versions(&wrangler).await?;

    let version = app_version(config);
    let git_info = git::collect(&config.worker.dir, &config.github_repo).await;
    let commands = command_count(config);

    let store = match out {
        Some(path) => ManifestStore::new(path),
        None => ManifestStore::from_config(config),
    };
    let previous = store.try_load();

    let mut manifest = manifest::build(
        config,
        &version,
        git_info,
        commands,
        &records,
        previous.as_ref(),
        Utc::now(),
    );

    if check_health || Config::check_health_requested() {
        output.progress("Checking deployment health...");
        manifest::annotate_health(&mut manifest, config.probe_timeout).await;

        let mut diag = Diagnostics::default();
        for release in &manifest.versions {
            if release.healthy == Some(false)
                && let Some(url) = &release.preview_url
            {
                diag.warn(Warning::probe_failed(format!("{url} is unhealthy")));
            }
        }
        for preview in &manifest.previews {
            if preview.healthy == Some(false) {
                diag.warn(Warning::probe_failed(format!("{} is unhealthy", preview.url)));
            }
        }
        for warning in diag.warnings() {
            output.warning(&warning.message);
        }
    }

    store.write(&manifest)?;

    output.success(&format!(
        "versions.json: {} versions, {} PR previews",
        manifest.versions.len(),
        manifest.previews.len()
    ));
    Ok(())
}
