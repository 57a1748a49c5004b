// ABOUTME: Typed wrangler operations built on the CommandRunner capability.
// ABOUTME: Scopes every invocation to the configured worker name and directory.

use std::path::Path;

use super::runner::{CommandRunner, RunnerError};
use crate::config::Config;

/// Wrangler operations scoped to one worker.
pub struct Wrangler<'a, R: CommandRunner> {
    runner: &'a R,
    name: &'a str,
    dir: &'a Path,
}

impl<'a, R: CommandRunner> Wrangler<'a, R> {
    pub fn new(runner: &'a R, config: &'a Config) -> Self {
        Self {
            runner,
            name: config.worker.name.as_str(),
            dir: &config.worker.dir,
        }
    }

    /// Run a captured command scoped to this worker; non-zero exit is an error.
    async fn capture(&self, args: &[&str]) -> Result<String, RunnerError> {
        let mut full: Vec<&str> = args.to_vec();
        full.push("--name");
        full.push(self.name);

        let output = self.runner.run(&full, self.dir).await?;
        if !output.success() {
            return Err(RunnerError::CommandFailed {
                bin: "wrangler".to_string(),
                args: args.join(" "),
                code: output.exit_code,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout)
    }

    /// Run a streamed command scoped to this worker; non-zero exit is an error.
    async fn checked_stream(&self, args: &[&str]) -> Result<(), RunnerError> {
        let mut full: Vec<&str> = args.to_vec();
        full.push("--name");
        full.push(self.name);

        let code = self.runner.stream(&full, self.dir).await?;
        if code != 0 {
            return Err(RunnerError::CommandFailed {
                bin: "wrangler".to_string(),
                args: args.join(" "),
                code,
                stderr: String::new(),
            });
        }
        Ok(())
    }

    /// `versions list`, captured for parsing.
    pub async fn versions_list(&self) -> Result<String, RunnerError> {
        self.capture(&["versions", "list"]).await
    }

    /// `versions upload` with tag/message/alias/variable arguments, streamed
    /// so the upload log reaches the terminal.
    pub async fn versions_upload(&self, extra: &[String]) -> Result<(), RunnerError> {
        let mut args = vec!["versions", "upload"];
        args.extend(extra.iter().map(String::as_str));
        self.checked_stream(&args).await
    }

    /// Deploy a version at 100% traffic, non-interactively.
    pub async fn deploy_version(&self, version_id: &str) -> Result<(), RunnerError> {
        let target = format!("{version_id}@100%");
        self.checked_stream(&["versions", "deploy", &target, "--yes"])
            .await
    }

    /// The platform's own interactive rollback prompt. Used only when no
    /// manifest exists to resolve the previous version from.
    pub async fn rollback_interactive(&self) -> Result<i32, RunnerError> {
        self.runner.stream(&["rollback"], self.dir).await
    }

    /// Pass a command through to wrangler unmodified, streaming output.
    /// Returns the exit code for the caller to propagate.
    pub async fn passthrough(&self, args: &[&str], scoped: bool) -> Result<i32, RunnerError> {
        if scoped {
            let mut full: Vec<&str> = args.to_vec();
            full.push("--name");
            full.push(self.name);
            self.runner.stream(&full, self.dir).await
        } else {
            self.runner.stream(args, self.dir).await
        }
    }
}
