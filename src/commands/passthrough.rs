// ABOUTME: Passthrough commands streamed straight to wrangler.
// ABOUTME: The exit code is propagated unchanged to the caller.

use crate::config::Config;
use crate::error::Result;
use crate::wrangler::{CommandRunner, Wrangler};

/// Stream a wrangler command to the terminal, returning its exit code.
///
/// `scoped` appends `--name <worker>`; account-level commands like
/// `whoami` run unscoped.
pub async fn passthrough<R: CommandRunner>(
    runner: &R,
    config: &Config,
    args: &[&str],
    scoped: bool,
) -> Result<i32> {
    let wrangler = Wrangler::new(runner, config);
    Ok(wrangler.passthrough(args, scoped).await?)
}
