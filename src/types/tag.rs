// ABOUTME: Classification of version tags reported by the platform.
// ABOUTME: Releases are `v<semver>`, previews are `pr-<n>`, everything else is untagged.

/// A classified version tag.
///
/// The platform stores tags as free text; stratus imposes meaning on two
/// patterns. Tags matching neither (including the `-` sentinel for "no tag")
/// are `Other` and excluded from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `v<version>` — a promoted release. Carries the version with the
    /// leading `v` stripped.
    Release(String),
    /// `pr-<n>` — an ephemeral PR preview. Carries the PR number.
    Preview(String),
    /// Anything else, including untagged uploads.
    Other(String),
}

impl Tag {
    /// Classify a raw tag string.
    pub fn classify(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("pr-") {
            return Tag::Preview(rest.to_string());
        }
        if let Some(rest) = raw.strip_prefix('v')
            && rest.chars().next().is_some_and(|c| c.is_ascii_digit())
        {
            return Tag::Release(rest.to_string());
        }
        Tag::Other(raw.to_string())
    }
}
