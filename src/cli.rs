// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Versioned deploy toolkit for Cloudflare Workers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON lines output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Explicit config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Worker directory (default: .)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Override worker name
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Override domain (default: workers.dev)
    #[arg(long, global = true)]
    pub domain: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a new version (does not touch production traffic)
    Upload {
        /// Version to upload, overriding the configured source
        #[arg(long)]
        version: Option<String>,

        /// Custom tag, wins over the version-derived tag
        #[arg(long)]
        tag: Option<String>,

        /// PR number; uploads as a pr-<n> preview
        #[arg(long)]
        pr: Option<String>,
    },

    /// Upload a PR preview version
    Preview {
        /// PR number
        pr: String,
    },

    /// Promote a version to 100% of traffic
    Promote {
        /// Version or tag to promote (default: latest from the manifest)
        version: Option<String>,
    },

    /// Revert traffic to the previous version
    Rollback,

    /// Health + index checks against a deployed URL
    Smoke {
        /// URL to test (default: latest from the manifest, then production)
        url: Option<String>,
    },

    /// Generate the versions.json manifest
    #[command(name = "versions-json")]
    VersionsJson {
        /// Output path override
        #[arg(long)]
        out: Option<PathBuf>,

        /// Probe each deployment's health endpoint
        #[arg(long)]
        check_health: bool,
    },

    /// List deployed versions and PR previews with URLs
    List,

    /// Show deployment status
    Status,

    /// Scaffold a new worker project
    Init {
        /// Worker name
        #[arg(long)]
        name: String,

        /// Domain the worker serves from
        #[arg(long, default_value = "workers.dev")]
        domain: String,

        /// Overwrite an existing wrangler.toml
        #[arg(long)]
        force: bool,
    },

    /// Stream worker logs
    Tail,

    /// List worker secrets
    Secrets,

    /// Show the authenticated account
    Whoami,

    /// Raw platform versions listing
    Versions,

    /// Delete the worker
    Delete,
}
