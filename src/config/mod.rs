// ABOUTME: Configuration types and loading for stratus.yml.
// ABOUTME: Fixed precedence per key: CLI flag > env var > config file > built-in default.

mod init;
mod version_source;

pub use init::init_project;
pub use version_source::{PLACEHOLDER_VERSION, app_version, command_count};

use crate::error::{Error, Result};
use crate::types::WorkerName;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "stratus.yml";
pub const CONFIG_FILENAME_ALT: &str = "stratus.yaml";

/// Fully resolved, immutable configuration. Constructed once per invocation
/// and passed by reference into every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub worker: WorkerConfig,
    /// Production URL, empty when unconfigured.
    pub production_url: String,
    /// GitHub repository URL, empty when unconfigured.
    pub github_repo: String,
    /// JSON file the app version is read from.
    pub version_source: PathBuf,
    /// Where versions.json is written.
    pub output: PathBuf,
    /// Static assets directory the widget is synced into.
    pub assets_dir: PathBuf,
    /// Optional project-specific smoke check command.
    pub smoke_extra: Option<String>,
    /// Wrangler binary to invoke.
    pub wrangler_bin: String,
    /// Per-probe timeout during manifest generation health checks.
    pub probe_timeout: Duration,
    /// Per-request timeout during smoke tests.
    pub smoke_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub name: WorkerName,
    pub domain: String,
    pub dir: PathBuf,
}

/// CLI flag overrides, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub name: Option<String>,
    pub domain: Option<String>,
}

impl Config {
    /// Load configuration for the current invocation.
    ///
    /// Worker dir comes from the `--dir` flag, `STRATUS_DIR`, the config
    /// file, or `.`. The config file is the `--config` path if given, else
    /// `stratus.yml`/`stratus.yaml` discovered in the worker dir. Worker
    /// name and assets dir fall back to the worker's `wrangler.toml`.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let dir = overrides
            .dir
            .clone()
            .or_else(|| env::var("STRATUS_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let raw = match &overrides.config {
            Some(path) => RawConfig::load(path)?,
            None => RawConfig::discover(&dir)?,
        };

        let dir = match (&overrides.dir, env::var("STRATUS_DIR").ok(), &raw.worker.dir) {
            (Some(flag), _, _) => flag.clone(),
            (None, Some(env_dir), _) => PathBuf::from(env_dir),
            (None, None, Some(file_dir)) => file_dir.clone(),
            (None, None, None) => dir,
        };

        let toml_fallback = WranglerToml::read(&dir);

        let name = overrides
            .name
            .clone()
            .or_else(|| env::var("STRATUS_NAME").ok())
            .or_else(|| raw.worker.name.clone())
            .or_else(|| toml_fallback.name.clone())
            .unwrap_or_else(|| "my-worker".to_string());
        let name = WorkerName::new(&name).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let domain = overrides
            .domain
            .clone()
            .or_else(|| env::var("STRATUS_DOMAIN").ok())
            .or_else(|| raw.worker.domain.clone())
            .unwrap_or_else(|| "workers.dev".to_string());

        let assets_dir = dir.join(
            raw.assets
                .dir
                .clone()
                .or(toml_fallback.assets_dir)
                .unwrap_or_else(|| "public".to_string()),
        );

        let output = env::var("STRATUS_OUTPUT")
            .ok()
            .map(PathBuf::from)
            .or_else(|| raw.output.versions_json.clone().map(|p| dir.join(p)))
            .unwrap_or_else(|| assets_dir.join("versions.json"));

        let version_source = dir.join(
            raw.version
                .source
                .clone()
                .unwrap_or_else(|| "package.json".to_string()),
        );

        Ok(Config {
            worker: WorkerConfig { name, domain, dir },
            production_url: env::var("STRATUS_PRODUCTION_URL")
                .ok()
                .or(raw.urls.production)
                .unwrap_or_default(),
            github_repo: env::var("STRATUS_GITHUB_REPO")
                .ok()
                .or(raw.github.repo)
                .unwrap_or_default(),
            version_source,
            output,
            assets_dir,
            smoke_extra: env::var("SMOKE_EXTRA_CMD").ok().or(raw.smoke.extra),
            wrangler_bin: env::var("STRATUS_WRANGLER_BIN")
                .ok()
                .or(raw.wrangler.bin)
                .unwrap_or_else(|| "wrangler".to_string()),
            probe_timeout: raw.health.probe_timeout,
            smoke_timeout: raw.health.smoke_timeout,
        })
    }

    /// Whether manifest generation should probe deployment health.
    pub fn check_health_requested() -> bool {
        matches!(
            env::var("STRATUS_CHECK_HEALTH").ok().as_deref(),
            Some("1") | Some("true")
        )
    }

    pub fn template() -> Self {
        Config {
            worker: WorkerConfig {
                name: WorkerName::new("my-worker").expect("template name is valid"),
                domain: "workers.dev".to_string(),
                dir: PathBuf::from("."),
            },
            production_url: String::new(),
            github_repo: String::new(),
            version_source: PathBuf::from("./package.json"),
            output: PathBuf::from("./public/versions.json"),
            assets_dir: PathBuf::from("./public"),
            smoke_extra: None,
            wrangler_bin: "wrangler".to_string(),
            probe_timeout: default_probe_timeout(),
            smoke_timeout: default_smoke_timeout(),
        }
    }
}

/// The stratus.yml schema, before precedence resolution. Every key is
/// optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    worker: RawWorker,
    #[serde(default)]
    urls: RawUrls,
    #[serde(default)]
    github: RawGithub,
    #[serde(default)]
    version: RawVersion,
    #[serde(default)]
    output: RawOutput,
    #[serde(default)]
    smoke: RawSmoke,
    #[serde(default)]
    wrangler: RawWrangler,
    #[serde(default)]
    assets: RawAssets,
    #[serde(default)]
    health: RawHealth,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawWorker {
    name: Option<String>,
    domain: Option<String>,
    dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawUrls {
    production: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawGithub {
    repo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawVersion {
    source: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawOutput {
    versions_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSmoke {
    extra: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawWrangler {
    bin: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawAssets {
    dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawHealth {
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    probe_timeout: Duration,
    #[serde(default = "default_smoke_timeout", with = "humantime_serde")]
    smoke_timeout: Duration,
}

impl Default for RawHealth {
    fn default() -> Self {
        Self {
            probe_timeout: default_probe_timeout(),
            smoke_timeout: default_smoke_timeout(),
        }
    }
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_smoke_timeout() -> Duration {
    Duration::from_secs(10)
}

impl RawConfig {
    fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Look for stratus.yml next to the worker; absence is not an error.
    fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(RawConfig::default())
    }
}

/// Values extracted from the worker's wrangler.toml, used as fallbacks when
/// stratus.yml does not name them.
#[derive(Debug, Default)]
struct WranglerToml {
    name: Option<String>,
    assets_dir: Option<String>,
}

impl WranglerToml {
    fn read(dir: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(dir.join("wrangler.toml")) else {
            return Self::default();
        };
        let Ok(value) = text.parse::<toml::Value>() else {
            return Self::default();
        };

        Self {
            name: value
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            assets_dir: value
                .get("assets")
                .and_then(|a| a.get("directory"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let raw = RawConfig::from_yaml("{}").unwrap();
        assert!(raw.worker.name.is_none());
        assert_eq!(raw.health.probe_timeout, Duration::from_secs(5));
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r#"
worker:
  name: my-app
  domain: example.com
  dir: worker

urls:
  production: https://my-app.example.com

github:
  repo: https://github.com/org/my-app

version:
  source: schema.json

output:
  versions_json: public/versions.json

smoke:
  extra: "./scripts/smoke.sh"

health:
  probe_timeout: 2s
  smoke_timeout: 30s
"#;
        let raw = RawConfig::from_yaml(yaml).unwrap();
        assert_eq!(raw.worker.name.as_deref(), Some("my-app"));
        assert_eq!(raw.worker.domain.as_deref(), Some("example.com"));
        assert_eq!(raw.smoke.extra.as_deref(), Some("./scripts/smoke.sh"));
        assert_eq!(raw.health.probe_timeout, Duration::from_secs(2));
        assert_eq!(raw.health.smoke_timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw = RawConfig::from_yaml("unrelated: {}\nworker:\n  name: app\n").unwrap();
        assert_eq!(raw.worker.name.as_deref(), Some("app"));
    }
}
