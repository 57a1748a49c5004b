// ABOUTME: Rollback command implementation.
// ABOUTME: Reverts traffic to the previous uploaded release from the manifest.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::manifest::{ManifestStore, Release};
use crate::output::Output;
use crate::wrangler::{CommandRunner, RunnerError, Wrangler};

/// Shift 100% of traffic back to the previous release.
///
/// Requires at least two releases with a version ID in the manifest; the
/// manifest's descending sort makes index 0 current and index 1 previous.
/// Without a manifest file, falls back to the platform's own interactive
/// rollback prompt.
pub async fn rollback<R: CommandRunner>(
    runner: &R,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let wrangler = Wrangler::new(runner, config);

    let manifest = match ManifestStore::from_config(config).load() {
        Ok(manifest) => manifest,
        Err(Error::ManifestMissing(path)) => {
            output.progress(&format!(
                "No manifest at {} — using interactive rollback",
                path.display()
            ));
            let code = wrangler.rollback_interactive().await?;
            if code != 0 {
                return Err(Error::Wrangler(RunnerError::CommandFailed {
                    bin: "wrangler".to_string(),
                    args: "rollback".to_string(),
                    code,
                    stderr: String::new(),
                }));
            }
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let (current, previous) = resolve_previous(&manifest.versions)?;

    output.progress(&format!(
        "Rolling back: {} → {}",
        current.tag, previous.tag
    ));
    wrangler.deploy_version(&previous.version_id).await?;

    output.success(&format!("Rolled back to {}", previous.tag));
    Ok(())
}

fn resolve_previous(releases: &[Release]) -> Result<(&Release, &Release)> {
    let mut deployable = releases.iter().filter(|r| !r.version_id.is_empty());

    match (deployable.next(), deployable.next()) {
        (Some(current), Some(previous)) => Ok((current, previous)),
        _ => Err(Error::NothingToRollBack),
    }
}
