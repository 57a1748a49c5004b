// ABOUTME: Parser for the line-oriented `versions list` output.
// ABOUTME: A pure, order-preserving transform from raw text to structured records.

use super::ops::Wrangler;
use super::runner::{CommandRunner, RunnerError};

/// One upload as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    /// Opaque platform-assigned identifier, unique per upload.
    pub version_id: String,
    /// Creation timestamp as printed by the platform. Not guaranteed to
    /// parse as a timestamp; treated as an opaque sortable string.
    pub created: String,
    /// Free-text tag. Never the `-` sentinel; untagged uploads are dropped.
    pub tag: String,
}

/// Run `versions list` and parse the output, most recent first.
///
/// The raw listing is oldest-first; the parse preserves input order, so the
/// result is reversed here rather than inside the parser.
pub async fn fetch_versions<R: CommandRunner>(
    wrangler: &Wrangler<'_, R>,
) -> Result<Vec<VersionRecord>, RunnerError> {
    let raw = wrangler.versions_list().await?;
    let mut records = parse_versions_list(&raw);
    records.reverse();
    Ok(records)
}

/// Parse raw `versions list` text into records, in input order.
///
/// Scans line by line for the three field markers, accumulating a pending
/// record. A record is emitted only once all three fields have been seen and
/// the tag is not `-`. Anything else — banners, progress noise, blank lines —
/// is ignored. A pending record missing its `Created` field by the time the
/// `Tag` marker arrives is dropped.
pub fn parse_versions_list(raw: &str) -> Vec<VersionRecord> {
    let mut records = Vec::new();
    let mut version_id: Option<String> = None;
    let mut created: Option<String> = None;

    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix("Version ID:") {
            version_id = Some(rest.trim().to_string());
            created = None;
        } else if let Some(rest) = line.strip_prefix("Created:") {
            if version_id.is_some() {
                created = Some(rest.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("Tag:") {
            if let Some(id) = version_id.take() {
                let tag = rest.trim().to_string();
                if tag != "-"
                    && let Some(created) = created.take()
                {
                    records.push(VersionRecord {
                        version_id: id,
                        created,
                        tag,
                    });
                }
            }
            created = None;
        }
    }

    records
}
