// ABOUTME: Best-effort git metadata for the currently configured app version.
// ABOUTME: Any git failure yields None; the manifest simply omits the block.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;

/// Commit provenance attached to the release matching the current app
/// version. Field names are part of the manifest wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitInfo {
    pub commit_sha: String,
    pub commit_full: String,
    pub commit_message: String,
    pub branch: String,
    pub commit_url: String,
}

/// Collect commit info from the repository containing `dir`.
///
/// Returns None when git is unavailable, the dir is not a repository, or
/// any individual query fails — callers treat absence as "no provenance".
pub async fn collect(dir: &Path, github_repo: &str) -> Option<GitInfo> {
    let commit_full = git(dir, &["rev-parse", "HEAD"]).await?;
    let commit_sha = git(dir, &["rev-parse", "--short", "HEAD"]).await?;
    let commit_message = git(dir, &["log", "-1", "--pretty=%s"]).await?;
    let branch = git(dir, &["rev-parse", "--abbrev-ref", "HEAD"]).await?;

    let commit_url = commit_url(github_repo, &commit_full);

    Some(GitInfo {
        commit_sha,
        commit_full,
        commit_message,
        branch,
        commit_url,
    })
}

/// Commit permalink on the configured GitHub repo; empty when unconfigured.
fn commit_url(github_repo: &str, full_sha: &str) -> String {
    if github_repo.is_empty() {
        String::new()
    } else {
        format!("{}/commit/{full_sha}", github_repo.trim_end_matches('/'))
    }
}

async fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
