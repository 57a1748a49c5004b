// ABOUTME: Manifest generation and persistence.
// ABOUTME: Regenerates versions.json from platform records, carrying forward git provenance.

use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::join_all;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use super::order::compare_versions;
use super::{Preview, Release, VersionsJson};
use crate::config::{Config, PLACEHOLDER_VERSION};
use crate::error::{Error, Result};
use crate::git::GitInfo;
use crate::health;
use crate::types::Tag;
use crate::urls::{upload_preview_url, version_alias_url, worker_url};
use crate::wrangler::VersionRecord;

/// Reads and writes the manifest file at its configured path.
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.output.clone())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Parse the manifest; missing or invalid files are errors the caller
    /// must handle (typically by telling the user to generate first).
    pub fn load(&self) -> Result<VersionsJson> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|_| Error::ManifestMissing(self.path.clone()))?;
        serde_json::from_str(&text).map_err(|source| Error::ManifestInvalid {
            path: self.path.clone(),
            source,
        })
    }

    /// Best-effort read used during generation: "no prior data" and
    /// "corrupt prior data" both yield None, the latter with a log line.
    pub fn try_load(&self) -> Option<VersionsJson> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&text) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!("ignoring unparseable manifest at {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Write pretty-printed with a trailing newline, creating parent dirs.
    pub fn write(&self, manifest: &VersionsJson) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(manifest)?;
        json.push('\n');
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Assemble a manifest from freshly queried records.
///
/// `records` must be most-recent-first; deduplication keeps the first
/// occurrence of each version. Git and command-count metadata attach to the
/// release matching `app_version`; all other releases copy theirs forward
/// from `previous` when a release with the same version exists there.
pub fn build(
    config: &Config,
    app_version: &str,
    git: Option<GitInfo>,
    command_count: Option<u64>,
    records: &[VersionRecord],
    previous: Option<&VersionsJson>,
    now: DateTime<Utc>,
) -> VersionsJson {
    let name = config.worker.name.as_str();
    let domain = &config.worker.domain;

    let mut releases: Vec<Release> = Vec::new();
    let mut previews: Vec<Preview> = Vec::new();

    for record in records {
        match Tag::classify(&record.tag) {
            Tag::Release(version) => {
                releases.push(Release {
                    url: version_alias_url(name, domain, &version),
                    version,
                    tag: record.tag.clone(),
                    date: record.created.clone(),
                    version_id: record.version_id.clone(),
                    preview_url: Some(upload_preview_url(name, domain, &record.version_id)),
                    healthy: None,
                    git: None,
                    command_count: None,
                });
            }
            Tag::Preview(number) => {
                previews.push(Preview {
                    label: format!("PR #{number}"),
                    tag: record.tag.clone(),
                    date: record.created.clone(),
                    version_id: record.version_id.clone(),
                    url: worker_url(name, domain, &record.tag),
                    healthy: None,
                });
            }
            Tag::Other(_) => {}
        }
    }

    for release in &mut releases {
        if release.version == app_version {
            release.git = git.clone();
            release.command_count = command_count;
        } else if let Some(prev) = previous
            && let Some(old) = prev.versions.iter().find(|r| r.version == release.version)
        {
            release.git = old.git.clone();
            release.command_count = old.command_count;
        }
    }

    let mut seen = HashSet::new();
    releases.retain(|r| seen.insert(r.version.clone()));

    releases.sort_by(|a, b| compare_versions(&b.version, &a.version));

    // The configured app version is always listed, as a placeholder when it
    // has not been uploaded yet — except for the 0.0.0 "no version" case.
    if app_version != PLACEHOLDER_VERSION && !releases.iter().any(|r| r.version == app_version) {
        releases.insert(
            0,
            Release {
                version: app_version.to_string(),
                tag: format!("v{app_version}"),
                date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                version_id: String::new(),
                url: version_alias_url(name, domain, app_version),
                preview_url: None,
                healthy: None,
                git,
                command_count,
            },
        );
    }

    VersionsJson {
        production: if config.production_url.is_empty() {
            format!("https://{name}.{domain}")
        } else {
            config.production_url.clone()
        },
        github: config.github_repo.clone(),
        generated: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        versions: releases,
        previews,
    }
}

/// Probe every release's preview URL and every preview's URL concurrently,
/// recording the boolean outcome. Each probe is independently time-bounded;
/// failures mark the entry unhealthy and never abort generation.
pub async fn annotate_health(manifest: &mut VersionsJson, timeout: Duration) {
    let release_probes: Vec<(usize, String)> = manifest
        .versions
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.preview_url.clone().map(|url| (i, url)))
        .collect();
    let preview_probes: Vec<(usize, String)> = manifest
        .previews
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.url.clone()))
        .collect();

    let releases = join_all(release_probes.into_iter().map(|(i, url)| async move {
        (i, health::check_health(&url, timeout).await.is_some())
    }));
    let previews = join_all(preview_probes.into_iter().map(|(i, url)| async move {
        (i, health::check_health(&url, timeout).await.is_some())
    }));

    let (release_results, preview_results) = futures::join!(releases, previews);

    for (i, healthy) in release_results {
        manifest.versions[i].healthy = Some(healthy);
    }
    for (i, healthy) in preview_results {
        manifest.previews[i].healthy = Some(healthy);
    }
}
