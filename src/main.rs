// ABOUTME: Entry point for the stratus CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use std::path::PathBuf;
use stratus::commands::{self, UploadOpts};
use stratus::config::{self, Config, Overrides};
use stratus::error::Result;
use stratus::output::{Output, OutputMode};
use stratus::wrangler::WranglerCli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    match run(cli, &output).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli, output: &Output) -> Result<i32> {
    if let Commands::Init {
        name,
        domain,
        force,
    } = &cli.command
    {
        let dir = cli
            .dir
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        config::init_project(&dir, name, domain, *force)?;
        return Ok(0);
    }

    let overrides = Overrides {
        config: cli.config.clone(),
        dir: cli.dir.clone(),
        name: cli.name.clone(),
        domain: cli.domain.clone(),
    };
    let config = Config::load(&overrides)?;
    let runner = WranglerCli::new(&config.wrangler_bin);

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),

        Commands::Upload { version, tag, pr } => {
            let opts = UploadOpts { version, tag, pr };
            commands::upload(&runner, &config, &opts, output).await?;
            Ok(0)
        }

        Commands::Preview { pr } => {
            let opts = UploadOpts {
                pr: Some(pr),
                ..Default::default()
            };
            commands::upload(&runner, &config, &opts, output).await?;
            Ok(0)
        }

        Commands::Promote { version } => {
            commands::promote(&runner, &config, version.as_deref(), output).await?;
            Ok(0)
        }

        Commands::Rollback => {
            commands::rollback(&runner, &config, output).await?;
            Ok(0)
        }

        Commands::Smoke { url } => {
            commands::smoke(&config, url.as_deref(), output).await?;
            Ok(0)
        }

        Commands::VersionsJson { out, check_health } => {
            commands::versions_json(&runner, &config, out, check_health, output).await?;
            Ok(0)
        }

        Commands::List => {
            commands::list(&runner, &config, output).await?;
            Ok(0)
        }

        Commands::Status => {
            commands::passthrough(&runner, &config, &["deployments", "list"], true).await
        }

        Commands::Tail => commands::passthrough(&runner, &config, &["tail"], true).await,

        Commands::Secrets => {
            commands::passthrough(&runner, &config, &["secret", "list"], true).await
        }

        Commands::Whoami => commands::passthrough(&runner, &config, &["whoami"], false).await,

        Commands::Versions => {
            commands::passthrough(&runner, &config, &["versions", "list"], true).await
        }

        Commands::Delete => commands::passthrough(&runner, &config, &["delete"], true).await,
    }
}
