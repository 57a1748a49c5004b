// ABOUTME: Centralized URL construction for worker preview/alias URLs.
// ABOUTME: Pure functions, no network or filesystem access.

/// Build a worker URL from a prefix (tag slug, version alias, or upload id).
pub fn worker_url(name: &str, domain: &str, prefix: &str) -> String {
    format!("https://{prefix}-{name}.{domain}")
}

/// Build the stable alias URL for a version string (e.g. "1.2.0" → "v1-2-0-...").
///
/// The version is slugged mechanically: lowercased, dots replaced with
/// hyphens, prefixed with `v`. No semver validation — a version already
/// starting with `v` produces a double-`v` prefix, which downstream
/// consumers rely on staying stable.
pub fn version_alias_url(name: &str, domain: &str, version: &str) -> String {
    let slug = version.replace('.', "-").to_lowercase();
    worker_url(name, domain, &format!("v{slug}"))
}

/// Build the immutable per-upload URL, keyed by the platform version id.
///
/// The platform exposes each upload at a URL prefixed by the first
/// hyphen-separated segment of its version id; that URL is never reused.
pub fn upload_preview_url(name: &str, domain: &str, version_id: &str) -> String {
    let short = version_id.split('-').next().unwrap_or(version_id);
    worker_url(name, domain, short)
}
