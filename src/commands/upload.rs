// ABOUTME: Upload command implementation.
// ABOUTME: Uploads a tagged version without shifting production traffic.

use crate::config::{Config, PLACEHOLDER_VERSION, app_version};
use crate::error::Result;
use crate::output::Output;
use crate::urls::{version_alias_url, worker_url};
use crate::widget;
use crate::wrangler::{CommandRunner, Wrangler};

#[derive(Debug, Clone, Default)]
pub struct UploadOpts {
    /// Explicit version, overriding the configured version source.
    pub version: Option<String>,
    /// Explicit tag; wins over version-derived tags.
    pub tag: Option<String>,
    /// PR number; uploads as a `pr-<n>` preview.
    pub pr: Option<String>,
}

/// Upload a new worker version and report its preview URL.
pub async fn upload<R: CommandRunner>(
    runner: &R,
    config: &Config,
    opts: &UploadOpts,
    output: &Output,
) -> Result<String> {
    let wrangler = Wrangler::new(runner, config);
    let version = opts
        .version
        .clone()
        .unwrap_or_else(|| app_version(config));
    let name = config.worker.name.as_str();
    let domain = &config.worker.domain;

    // Ship the current widget with every upload.
    widget::sync_web_assets(config)?;

    let mut args: Vec<String> = Vec::new();
    if version != PLACEHOLDER_VERSION {
        args.push("--var".to_string());
        args.push(format!("APP_VERSION:{version}"));
    }

    // An explicit tag wins over a PR number.
    if opts.tag.is_none()
        && let Some(pr) = &opts.pr
    {
        let tag = format!("pr-{pr}");
        args.extend([
            "--tag".to_string(),
            tag.clone(),
            "--message".to_string(),
            format!("PR #{pr}"),
            "--preview-alias".to_string(),
            tag.clone(),
        ]);

        output.progress(&format!("Uploading PR preview ({tag})..."));
        wrangler.versions_upload(&args).await?;

        let url = worker_url(name, domain, &tag);
        output.progress(&format!("\nPreview: {url}"));
        return Ok(url);
    }

    if let Some(tag) = &opts.tag {
        args.extend([
            "--tag".to_string(),
            tag.clone(),
            "--message".to_string(),
            tag.clone(),
            "--preview-alias".to_string(),
            tag.clone(),
        ]);
    } else if version != PLACEHOLDER_VERSION {
        let slug = version.replace('.', "-").to_lowercase();
        args.extend([
            "--tag".to_string(),
            format!("v{version}"),
            "--message".to_string(),
            format!("v{version}"),
            "--preview-alias".to_string(),
            format!("v{slug}"),
        ]);
    }

    if version == PLACEHOLDER_VERSION {
        output.progress("Uploading...");
    } else {
        output.progress(&format!("Uploading v{version}..."));
    }
    wrangler.versions_upload(&args).await?;

    let url = match &opts.tag {
        Some(tag) => worker_url(name, domain, tag),
        None if version != PLACEHOLDER_VERSION => version_alias_url(name, domain, &version),
        None => String::new(),
    };

    if !url.is_empty() {
        output.progress(&format!("\nPreview: {url}"));
        if opts.tag.is_none() {
            output.progress("To promote to production: stratus promote");
        }
    }

    Ok(url)
}
