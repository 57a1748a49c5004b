// ABOUTME: Subprocess capability trait and the production wrangler implementation.
// ABOUTME: Commands are tested against canned fixtures by swapping the runner.

use async_trait::async_trait;
use snafu::Snafu;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Result of a captured subprocess invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Errors from spawning or waiting on the wrangler subprocess.
///
/// A non-zero exit from wrangler itself is reported in [`CommandOutput`],
/// not here; callers decide whether that is fatal.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RunnerError {
    #[snafu(display("failed to spawn {bin}: {source}"))]
    Spawn { bin: String, source: std::io::Error },

    #[snafu(display("{bin} {args} exited with status {code}: {stderr}"))]
    CommandFailed {
        bin: String,
        args: String,
        code: i32,
        stderr: String,
    },

    #[snafu(display("{bin} terminated by signal"))]
    Terminated { bin: String },
}

/// Capability to run the platform CLI.
///
/// One subprocess runs at a time; invocations are synchronous from the
/// caller's perspective. There is no mechanism to cancel an in-flight
/// subprocess.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with captured stdout/stderr.
    async fn run(&self, args: &[&str], dir: &Path) -> Result<CommandOutput, RunnerError>;

    /// Run with stdout/stderr inherited by the terminal; returns the exit code.
    async fn stream(&self, args: &[&str], dir: &Path) -> Result<i32, RunnerError>;
}

/// Production runner: spawns the configured wrangler binary.
pub struct WranglerCli {
    bin: String,
}

impl WranglerCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl CommandRunner for WranglerCli {
    async fn run(&self, args: &[&str], dir: &Path) -> Result<CommandOutput, RunnerError> {
        tracing::debug!("running: {} {}", self.bin, args.join(" "));

        let output = Command::new(&self.bin)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        let exit_code = output.status.code().ok_or_else(|| RunnerError::Terminated {
            bin: self.bin.clone(),
        })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code,
        })
    }

    async fn stream(&self, args: &[&str], dir: &Path) -> Result<i32, RunnerError> {
        tracing::debug!("streaming: {} {}", self.bin, args.join(" "));

        let status = Command::new(&self.bin)
            .args(args)
            .current_dir(dir)
            .status()
            .await
            .map_err(|source| RunnerError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        status.code().ok_or_else(|| RunnerError::Terminated {
            bin: self.bin.clone(),
        })
    }
}
