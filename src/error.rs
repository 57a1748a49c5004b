// ABOUTME: Application-wide error types for stratus.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::wrangler::RunnerError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} already exists in this directory")]
    AlreadyExists(PathBuf),

    #[error("version \"{requested}\" not found in manifest (available: {})", .available.join(", "))]
    VersionNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("release {0} has no version ID — upload it first")]
    NotUploaded(String),

    #[error("manifest has no releases — upload first")]
    NoReleases,

    #[error("only one deployable version in manifest — nothing to roll back to")]
    NothingToRollBack,

    #[error("cannot read {0} — run 'stratus versions-json' first")]
    ManifestMissing(PathBuf),

    #[error("manifest at {path} is not valid JSON: {source}")]
    ManifestInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no URL to smoke test — pass a URL or set urls.production in stratus.yml")]
    NoSmokeTarget,

    #[error("{url}/api/health unreachable")]
    HealthUnreachable { url: String },

    #[error("{url}/ unreachable: {reason}")]
    IndexUnreachable { url: String, reason: String },

    #[error("extra smoke checks failed")]
    SmokeExtraFailed,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Wrangler(#[from] RunnerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
