// ABOUTME: List command implementation.
// ABOUTME: Prints deployed releases and PR previews with their URLs.

use crate::config::Config;
use crate::error::Result;
use crate::output::Output;
use crate::types::Tag;
use crate::urls::{version_alias_url, worker_url};
use crate::wrangler::{CommandRunner, Wrangler, fetch_versions};

/// List all tagged versions and PR previews, most recent first.
pub async fn list<R: CommandRunner>(
    runner: &R,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let wrangler = Wrangler::new(runner, config);
    let records = fetch_versions(&wrangler).await?;

    let name = config.worker.name.as_str();
    let domain = &config.worker.domain;

    let mut releases = Vec::new();
    let mut previews = Vec::new();
    for record in &records {
        match Tag::classify(&record.tag) {
            Tag::Release(version) => releases.push((record, version)),
            Tag::Preview(_) => previews.push(record),
            Tag::Other(_) => {}
        }
    }

    if !releases.is_empty() {
        output.progress("=== Release Versions ===\n");
        for (record, version) in &releases {
            output.progress(&format!("  {}  ({})", record.tag, record.created));
            output.progress(&format!("    {}\n", version_alias_url(name, domain, version)));
        }
    }

    if !previews.is_empty() {
        output.progress("=== PR Previews ===\n");
        for record in &previews {
            output.progress(&format!("  {}  ({})", record.tag, record.created));
            output.progress(&format!(
                "    {}\n",
                worker_url(name, domain, &record.tag)
            ));
        }
    }

    if !config.production_url.is_empty() {
        output.progress(&format!("Production:  {}", config.production_url));
    }

    Ok(())
}
