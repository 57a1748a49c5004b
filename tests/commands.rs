// ABOUTME: Integration tests for command orchestration over a canned runner.
// ABOUTME: No real wrangler process is spawned; invocations are recorded and asserted.

mod support;

use std::path::PathBuf;
use support::{FixtureRunner, listing};

use stratus::commands::{self, UploadOpts};
use stratus::config::Config;
use stratus::error::Error;
use stratus::manifest::{ManifestStore, Release, VersionsJson};
use stratus::output::{Output, OutputMode};

fn quiet() -> Output {
    Output::new(OutputMode::Quiet)
}

/// Config rooted in a temp dir so nothing touches the real filesystem.
fn test_config(dir: &std::path::Path) -> Config {
    let mut config = Config::template();
    config.worker.dir = dir.to_path_buf();
    config.assets_dir = dir.join("public");
    config.output = dir.join("public").join("versions.json");
    config.version_source = dir.join("package.json");
    config
}

fn release(version: &str, id: &str) -> Release {
    Release {
        version: version.to_string(),
        tag: format!("v{version}"),
        date: "2025-01-15T10:30:00Z".to_string(),
        version_id: id.to_string(),
        url: format!(
            "https://v{}-my-worker.workers.dev",
            version.replace('.', "-")
        ),
        preview_url: None,
        healthy: None,
        git: None,
        command_count: None,
    }
}

fn write_manifest(config: &Config, versions: Vec<Release>) {
    ManifestStore::from_config(config)
        .write(&VersionsJson {
            production: "https://my-worker.workers.dev".to_string(),
            github: String::new(),
            generated: "2025-01-20T12:00:00Z".to_string(),
            versions,
            previews: vec![],
        })
        .unwrap();
}

mod versions_json {
    use super::*;

    #[tokio::test]
    async fn generates_manifest_from_platform_listing() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(dir.path().join("package.json"), r#"{"version": "2.0.0"}"#).unwrap();

        let runner = FixtureRunner::new(listing(&[
            ("aaa-1", "2025-01-15T10:00:00Z", "v1.0.0"),
            ("bbb-2", "2025-01-16T10:00:00Z", "v2.0.0"),
            ("ccc-3", "2025-01-17T10:00:00Z", "pr-42"),
        ]));

        commands::versions_json(&runner, &config, None, false, &quiet())
            .await
            .unwrap();

        // The listing was fetched scoped to the worker.
        assert_eq!(
            runner.run_args(),
            vec![vec![
                "versions".to_string(),
                "list".to_string(),
                "--name".to_string(),
                "my-worker".to_string(),
            ]]
        );

        let manifest = ManifestStore::from_config(&config).load().unwrap();
        let versions: Vec<&str> = manifest
            .versions
            .iter()
            .map(|r| r.version.as_str())
            .collect();
        assert_eq!(versions, vec!["2.0.0", "1.0.0"]);
        assert_eq!(manifest.previews.len(), 1);
        assert_eq!(manifest.previews[0].label, "PR #42");
        assert_eq!(manifest.versions[0].version_id, "bbb-2");
    }

    #[tokio::test]
    async fn current_version_without_upload_gets_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::write(dir.path().join("package.json"), r#"{"version": "3.0.0"}"#).unwrap();

        let runner = FixtureRunner::new(listing(&[("aaa-1", "2025-01-15T10:00:00Z", "v1.0.0")]));

        commands::versions_json(&runner, &config, None, false, &quiet())
            .await
            .unwrap();

        let manifest = ManifestStore::from_config(&config).load().unwrap();
        assert_eq!(manifest.versions[0].version, "3.0.0");
        assert!(manifest.versions[0].version_id.is_empty());
        assert!(manifest.versions[0].preview_url.is_none());
    }

    #[tokio::test]
    async fn carries_command_count_forward_across_regeneration() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        // First run: 1.0.0 is current, with a command count.
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"version": "1.0.0", "commands": {"a": {}, "b": {}}}"#,
        )
        .unwrap();
        let runner = FixtureRunner::new(listing(&[("aaa-1", "2025-01-15T10:00:00Z", "v1.0.0")]));
        commands::versions_json(&runner, &config, None, false, &quiet())
            .await
            .unwrap();

        // Second run: 2.0.0 is now current; 1.0.0's metadata must survive.
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"version": "2.0.0", "commands": {"a": {}, "b": {}, "c": {}}}"#,
        )
        .unwrap();
        let runner = FixtureRunner::new(listing(&[
            ("aaa-1", "2025-01-15T10:00:00Z", "v1.0.0"),
            ("bbb-2", "2025-01-16T10:00:00Z", "v2.0.0"),
        ]));
        commands::versions_json(&runner, &config, None, false, &quiet())
            .await
            .unwrap();

        let manifest = ManifestStore::from_config(&config).load().unwrap();
        let v1 = manifest
            .versions
            .iter()
            .find(|r| r.version == "1.0.0")
            .unwrap();
        assert_eq!(v1.command_count, Some(2));
        let v2 = manifest
            .versions
            .iter()
            .find(|r| r.version == "2.0.0")
            .unwrap();
        assert_eq!(v2.command_count, Some(3));
    }

    #[tokio::test]
    async fn out_flag_overrides_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let out: PathBuf = dir.path().join("elsewhere").join("v.json");

        let runner = FixtureRunner::new(listing(&[("aaa-1", "2025-01-15T10:00:00Z", "v1.0.0")]));
        commands::versions_json(&runner, &config, Some(out.clone()), false, &quiet())
            .await
            .unwrap();

        assert!(out.exists());
        assert!(!config.output.exists());
    }
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn version_upload_tags_and_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let runner = FixtureRunner::new("");

        let opts = UploadOpts {
            version: Some("1.2.3".to_string()),
            ..Default::default()
        };
        let url = commands::upload(&runner, &config, &opts, &quiet())
            .await
            .unwrap();

        assert_eq!(url, "https://v1-2-3-my-worker.workers.dev");
        let streamed = runner.streamed_args();
        assert_eq!(streamed.len(), 1);
        let args = &streamed[0];
        assert_eq!(args[0], "versions");
        assert_eq!(args[1], "upload");
        assert!(args.contains(&"APP_VERSION:1.2.3".to_string()));
        assert!(args.contains(&"v1.2.3".to_string()));
        assert!(args.contains(&"v1-2-3".to_string()));
        assert!(args.ends_with(&["--name".to_string(), "my-worker".to_string()]));
    }

    #[tokio::test]
    async fn pr_upload_uses_preview_tag() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let runner = FixtureRunner::new("");

        let opts = UploadOpts {
            version: Some("1.2.3".to_string()),
            pr: Some("42".to_string()),
            ..Default::default()
        };
        let url = commands::upload(&runner, &config, &opts, &quiet())
            .await
            .unwrap();

        assert_eq!(url, "https://pr-42-my-worker.workers.dev");
        let args = &runner.streamed_args()[0];
        assert!(args.contains(&"pr-42".to_string()));
        assert!(args.contains(&"PR #42".to_string()));
    }

    #[tokio::test]
    async fn custom_tag_wins_over_version_tag() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let runner = FixtureRunner::new("");

        let opts = UploadOpts {
            version: Some("1.2.3".to_string()),
            tag: Some("canary".to_string()),
            ..Default::default()
        };
        let url = commands::upload(&runner, &config, &opts, &quiet())
            .await
            .unwrap();

        assert_eq!(url, "https://canary-my-worker.workers.dev");
        let args = &runner.streamed_args()[0];
        assert!(args.contains(&"canary".to_string()));
        assert!(!args.contains(&"v1.2.3".to_string()));
    }

    #[tokio::test]
    async fn explicit_tag_wins_over_pr_number() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let runner = FixtureRunner::new("");

        let opts = UploadOpts {
            version: Some("1.2.3".to_string()),
            tag: Some("canary".to_string()),
            pr: Some("42".to_string()),
        };
        let url = commands::upload(&runner, &config, &opts, &quiet())
            .await
            .unwrap();

        assert_eq!(url, "https://canary-my-worker.workers.dev");
        let args = &runner.streamed_args()[0];
        assert!(args.contains(&"canary".to_string()));
        assert!(!args.contains(&"pr-42".to_string()));
    }

    #[tokio::test]
    async fn failed_upload_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let runner = FixtureRunner::failing(3);

        let opts = UploadOpts {
            version: Some("1.2.3".to_string()),
            ..Default::default()
        };
        let err = commands::upload(&runner, &config, &opts, &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Wrangler(_)));
    }

    #[tokio::test]
    async fn upload_syncs_widget_into_assets() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let runner = FixtureRunner::new("");

        let opts = UploadOpts {
            version: Some("1.0.0".to_string()),
            ..Default::default()
        };
        commands::upload(&runner, &config, &opts, &quiet())
            .await
            .unwrap();

        let widget = config.assets_dir.join("version-picker.js");
        assert!(widget.exists());
        let content = std::fs::read_to_string(widget).unwrap();
        assert!(content.starts_with("// AUTO-GENERATED"));
    }
}

mod promote {
    use super::*;

    #[tokio::test]
    async fn no_target_promotes_latest() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_manifest(&config, vec![release("2.0.0", "v2"), release("1.0.0", "v1")]);

        let runner = FixtureRunner::new("");
        commands::promote(&runner, &config, None, &quiet())
            .await
            .unwrap();

        let args = &runner.streamed_args()[0];
        assert_eq!(
            args,
            &vec![
                "versions".to_string(),
                "deploy".to_string(),
                "v2@100%".to_string(),
                "--yes".to_string(),
                "--name".to_string(),
                "my-worker".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn explicit_target_promotes_that_version() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_manifest(&config, vec![release("2.0.0", "v2"), release("1.0.0", "v1")]);

        let runner = FixtureRunner::new("");
        commands::promote(&runner, &config, Some("1.0.0"), &quiet())
            .await
            .unwrap();

        assert!(runner.streamed_args()[0].contains(&"v1@100%".to_string()));
    }

    #[tokio::test]
    async fn unknown_target_fails_without_deploying() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_manifest(&config, vec![release("2.0.0", "v2"), release("1.0.0", "v1")]);

        let runner = FixtureRunner::new("");
        let err = commands::promote(&runner, &config, Some("9.9.9"), &quiet())
            .await
            .unwrap_err();

        match err {
            Error::VersionNotFound { available, .. } => {
                assert_eq!(available, vec!["v2.0.0".to_string(), "v1.0.0".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(runner.streamed_args().is_empty());
    }

    #[tokio::test]
    async fn placeholder_target_fails_without_deploying() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_manifest(&config, vec![release("2.0.0", ""), release("1.0.0", "v1")]);

        let runner = FixtureRunner::new("");
        let err = commands::promote(&runner, &config, None, &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotUploaded(_)));
        assert!(runner.streamed_args().is_empty());
    }

    #[tokio::test]
    async fn missing_manifest_is_fatal_with_hint() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let runner = FixtureRunner::new("");
        let err = commands::promote(&runner, &config, None, &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ManifestMissing(_)));
        assert!(err.to_string().contains("versions-json"));
    }
}

mod rollback {
    use super::*;

    #[tokio::test]
    async fn targets_the_previous_release() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_manifest(&config, vec![release("2.0.0", "v2"), release("1.0.0", "v1")]);

        let runner = FixtureRunner::new("");
        commands::rollback(&runner, &config, &quiet()).await.unwrap();

        assert!(runner.streamed_args()[0].contains(&"v1@100%".to_string()));
    }

    #[tokio::test]
    async fn single_release_fails_without_deploying() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        write_manifest(&config, vec![release("1.0.0", "v1")]);

        let runner = FixtureRunner::new("");
        let err = commands::rollback(&runner, &config, &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NothingToRollBack));
        assert!(runner.streamed_args().is_empty());
    }

    #[tokio::test]
    async fn missing_manifest_falls_back_to_interactive() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let runner = FixtureRunner::new("");
        commands::rollback(&runner, &config, &quiet()).await.unwrap();

        assert_eq!(runner.streamed_args(), vec![vec!["rollback".to_string()]]);
    }
}

mod smoke {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn passes_against_production_fallback() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200)
                    .json_body(serde_json::json!({"status": "ok", "version": "1.0.0"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("<html></html>");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.production_url = server.base_url();

        commands::smoke(&config, None, &quiet()).await.unwrap();
    }

    #[tokio::test]
    async fn version_drift_warns_but_passes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200)
                    .json_body(serde_json::json!({"status": "ok", "version": "1.9.0"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("ok");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let mut expected = release("2.0.0", "v2");
        expected.url = server.base_url();
        write_manifest(&config, vec![expected]);

        // Drift between observed and expected versions is non-fatal.
        commands::smoke(&config, None, &quiet()).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_health_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.production_url = "http://127.0.0.1:9".to_string();
        config.smoke_timeout = std::time::Duration::from_millis(500);

        let err = commands::smoke(&config, None, &quiet()).await.unwrap_err();
        assert!(matches!(err, Error::HealthUnreachable { .. }));
    }

    #[tokio::test]
    async fn no_target_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let err = commands::smoke(&config, None, &quiet()).await.unwrap_err();
        assert!(matches!(err, Error::NoSmokeTarget));
    }

    #[tokio::test]
    async fn failing_extra_check_is_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200)
                    .json_body(serde_json::json!({"status": "ok", "version": "1.0.0"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("ok");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.production_url = server.base_url();
        config.smoke_extra = Some("exit 3".to_string());

        let err = commands::smoke(&config, None, &quiet()).await.unwrap_err();
        assert!(matches!(err, Error::SmokeExtraFailed));
    }
}
