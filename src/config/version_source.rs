// ABOUTME: Reads the current app version and command count from the configured source file.
// ABOUTME: Missing or unreadable sources fall back to the 0.0.0 placeholder.

use serde_json::Value;
use std::env;

use super::Config;

/// Version reported when no source is available. Uploads of this version
/// are untagged and the manifest never synthesizes a placeholder for it.
pub const PLACEHOLDER_VERSION: &str = "0.0.0";

/// Current app version: `APP_VERSION` env, else the source file's `version`
/// field, else the placeholder.
pub fn app_version(config: &Config) -> String {
    if let Ok(v) = env::var("APP_VERSION")
        && !v.is_empty()
    {
        return v;
    }

    read_source(config)
        .and_then(|data| {
            data.get("version")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| PLACEHOLDER_VERSION.to_string())
}

/// Number of entries in the source file's `commands` object, when present.
pub fn command_count(config: &Config) -> Option<u64> {
    read_source(config)?
        .get("commands")?
        .as_object()
        .map(|m| m.len() as u64)
}

fn read_source(config: &Config) -> Option<Value> {
    let text = std::fs::read_to_string(&config.version_source).ok()?;
    serde_json::from_str(&text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_with_source(dir: &std::path::Path, contents: &str) -> Config {
        let source = dir.join("package.json");
        fs::write(&source, contents).unwrap();
        let mut config = Config::template();
        config.version_source = source;
        config
    }

    #[test]
    fn reads_version_from_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_source(dir.path(), r#"{"version": "2.5.0"}"#);

        temp_env::with_var("APP_VERSION", None::<&str>, || {
            assert_eq!(app_version(&config), "2.5.0");
        });
    }

    #[test]
    fn missing_source_yields_placeholder() {
        let mut config = Config::template();
        config.version_source = std::path::PathBuf::from("/nonexistent/package.json");

        temp_env::with_var("APP_VERSION", None::<&str>, || {
            assert_eq!(app_version(&config), PLACEHOLDER_VERSION);
        });
    }

    #[test]
    fn invalid_json_yields_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_source(dir.path(), "not json{{{");

        temp_env::with_var("APP_VERSION", None::<&str>, || {
            assert_eq!(app_version(&config), PLACEHOLDER_VERSION);
        });
    }

    #[test]
    fn env_var_overrides_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_source(dir.path(), r#"{"version": "1.0.0"}"#);

        temp_env::with_var("APP_VERSION", Some("9.9.9"), || {
            assert_eq!(app_version(&config), "9.9.9");
        });
    }

    #[test]
    fn counts_commands_object_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_source(
            dir.path(),
            r#"{"version": "1.0.0", "commands": {"a": {}, "b": {}, "c": {}}}"#,
        );

        assert_eq!(command_count(&config), Some(3));
    }

    #[test]
    fn no_commands_key_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_source(dir.path(), r#"{"version": "1.0.0"}"#);

        assert_eq!(command_count(&config), None);
    }
}
