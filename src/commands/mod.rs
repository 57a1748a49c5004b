// ABOUTME: Command module aggregator for the stratus CLI.
// ABOUTME: Each command is a short-lived, one-shot orchestration over the wrangler boundary.

mod list;
mod passthrough;
mod promote;
mod rollback;
mod smoke;
mod upload;
mod versions_json;

pub use list::list;
pub use passthrough::passthrough;
pub use promote::promote;
pub use rollback::rollback;
pub use smoke::smoke;
pub use upload::{UploadOpts, upload};
pub use versions_json::versions_json;
