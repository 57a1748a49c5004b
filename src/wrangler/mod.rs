// ABOUTME: Boundary to the wrangler CLI, invoked as a subprocess.
// ABOUTME: Exports the CommandRunner capability trait, typed operations, and the versions-list parser.

mod ops;
mod runner;
mod versions;

pub use ops::Wrangler;
pub use runner::{CommandOutput, CommandRunner, RunnerError, WranglerCli};
pub use versions::{VersionRecord, fetch_versions, parse_versions_list};
