// ABOUTME: The versions.json manifest — wire types, generation, and persistence.
// ABOUTME: Field names are a bit-exact compatibility surface for the widget and CI scripts.

mod order;
mod store;

pub use order::compare_versions;
pub use store::{ManifestStore, annotate_health, build};

use serde::{Deserialize, Serialize};

use crate::git::GitInfo;

/// A promoted, semver-tagged deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Semver-like string, tag with the leading `v` stripped.
    pub version: String,
    /// Original tag.
    pub tag: String,
    /// Creation timestamp as reported by the platform.
    pub date: String,
    /// Platform upload identifier; empty for a placeholder not yet uploaded.
    pub version_id: String,
    /// Stable alias URL, recomputed from the version on every generation.
    pub url: String,
    /// Immutable per-upload URL; absent when no upload exists yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_count: Option<u64>,
}

/// An ephemeral PR-associated deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub label: String,
    pub tag: String,
    pub date: String,
    pub version_id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
}

/// The manifest root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionsJson {
    pub production: String,
    pub github: String,
    pub generated: String,
    pub versions: Vec<Release>,
    pub previews: Vec<Preview>,
}
