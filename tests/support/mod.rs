// ABOUTME: Shared test support: a canned-fixture CommandRunner.
// ABOUTME: Lets orchestration tests run without spawning real processes.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;
use stratus::wrangler::{CommandOutput, CommandRunner, RunnerError};

/// A runner that replays canned output and records every invocation.
pub struct FixtureRunner {
    /// Stdout returned for captured `run` calls.
    pub stdout: String,
    /// Exit code for both captured and streamed calls.
    pub exit_code: i32,
    /// Every captured invocation's args.
    pub runs: Mutex<Vec<Vec<String>>>,
    /// Every streamed invocation's args.
    pub streams: Mutex<Vec<Vec<String>>>,
}

impl FixtureRunner {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            exit_code: 0,
            runs: Mutex::new(Vec::new()),
            streams: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            exit_code,
            runs: Mutex::new(Vec::new()),
            streams: Mutex::new(Vec::new()),
        }
    }

    pub fn streamed_args(&self) -> Vec<Vec<String>> {
        self.streams.lock().unwrap().clone()
    }

    pub fn run_args(&self) -> Vec<Vec<String>> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FixtureRunner {
    async fn run(&self, args: &[&str], _dir: &Path) -> Result<CommandOutput, RunnerError> {
        self.runs
            .lock()
            .unwrap()
            .push(args.iter().map(|s| s.to_string()).collect());
        Ok(CommandOutput {
            stdout: self.stdout.clone(),
            stderr: String::new(),
            exit_code: self.exit_code,
        })
    }

    async fn stream(&self, args: &[&str], _dir: &Path) -> Result<i32, RunnerError> {
        self.streams
            .lock()
            .unwrap()
            .push(args.iter().map(|s| s.to_string()).collect());
        Ok(self.exit_code)
    }
}

/// A versions listing in the platform's output format, oldest first.
pub fn listing(entries: &[(&str, &str, &str)]) -> String {
    let mut out = String::new();
    for (id, created, tag) in entries {
        out.push_str(&format!(
            "Version ID:  {id}\nCreated:     {created}\nTag:         {tag}\n\n"
        ));
    }
    out
}
