// ABOUTME: Promote command implementation.
// ABOUTME: Shifts 100% of traffic to a release resolved from the manifest.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::manifest::{ManifestStore, Release, VersionsJson};
use crate::output::Output;
use crate::wrangler::{CommandRunner, Wrangler};

/// Promote a release to 100% traffic.
///
/// With no target, promotes the manifest's first (highest-sorted) release.
/// An explicit target matches by version or tag, with or without the
/// leading `v`.
pub async fn promote<R: CommandRunner>(
    runner: &R,
    config: &Config,
    target: Option<&str>,
    output: &Output,
) -> Result<()> {
    let manifest = ManifestStore::from_config(config).load()?;
    let release = resolve_target(&manifest, target)?;

    if release.version_id.is_empty() {
        return Err(Error::NotUploaded(release.tag.clone()));
    }

    let sha = release
        .git
        .as_ref()
        .map(|g| g.commit_sha.as_str())
        .unwrap_or("?");
    output.progress(&format!(
        "Promoting {} ({}, commit {sha}) to 100%...",
        release.version_id, release.tag
    ));

    Wrangler::new(runner, config)
        .deploy_version(&release.version_id)
        .await?;

    output.success(&format!("Promoted {}", release.tag));
    Ok(())
}

fn resolve_target<'a>(
    manifest: &'a VersionsJson,
    target: Option<&str>,
) -> Result<&'a Release> {
    match target {
        Some(requested) => {
            let bare = requested.strip_prefix('v').unwrap_or(requested);
            manifest
                .versions
                .iter()
                .find(|r| r.version == bare || r.tag == requested || r.tag == format!("v{bare}"))
                .ok_or_else(|| Error::VersionNotFound {
                    requested: requested.to_string(),
                    available: manifest.versions.iter().map(|r| r.tag.clone()).collect(),
                })
        }
        None => manifest.versions.first().ok_or(Error::NoReleases),
    }
}
